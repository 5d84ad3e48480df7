//! The four wire packet kinds and their codec.
//!
//! The in-memory representation and the byte layout live in one module so
//! they cannot drift apart. Layout is fixed and versionless: a tag byte,
//! little-endian integers, NUL-terminated UTF-8 strings.

pub mod bytes;
pub mod error;

use crate::{
    packet::{
        bytes::{ByteReader, ByteWriter},
        error::PacketError,
    },
    path::object_path::ObjectPath,
    types::PathId,
};

const TAG_PATH_ASSIGN: u8 = 0;
const TAG_PATH_ACK: u8 = 1;
const TAG_RPC_CALL: u8 = 2;
const TAG_RPC_SET: u8 = 3;

/// High bit of the target word marks the fallback form: the low 31 bits are
/// then a byte offset, within the same packet, to a full path at the tail.
const FALLBACK_BIT: u32 = 0x8000_0000;

/// How an RPC packet names its destination object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcTarget {
    /// Compact form: a previously assigned path id. 4 bytes on the wire.
    Id(PathId),
    /// Fallback form: the full path, carried at the packet tail. Used only
    /// while the destination peer has not yet confirmed the id mapping.
    Path(ObjectPath),
}

/// A decoded wire packet.
///
/// RPC argument bytes are opaque here: `args` is the back-to-back
/// concatenation of `argc` self-describing values, split by the session
/// with the external value codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    /// Sender assigns `id` to `path` for all its future compact-form
    /// packets to the receiver. Always sent reliable.
    PathAssign { id: PathId, path: ObjectPath },
    /// Receiver confirms it holds the mapping for `path`. Always sent
    /// reliable, addressed only to the assigning peer.
    PathAck { path: ObjectPath },
    /// Invoke `member` on the target object.
    RpcCall {
        target: RpcTarget,
        member: String,
        argc: u8,
        args: Vec<u8>,
    },
    /// Assign `member` on the target object.
    RpcSet {
        target: RpcTarget,
        member: String,
        value: Vec<u8>,
    },
}

impl Packet {
    pub fn ser(&self) -> Result<Vec<u8>, PacketError> {
        let mut writer = ByteWriter::new();
        match self {
            Packet::PathAssign { id, path } => {
                writer.write_u8(TAG_PATH_ASSIGN);
                writer.write_u32_le(id.value());
                writer.write_str_nul(path.as_str())?;
            }
            Packet::PathAck { path } => {
                writer.write_u8(TAG_PATH_ACK);
                writer.write_str_nul(path.as_str())?;
            }
            Packet::RpcCall {
                target,
                member,
                argc,
                args,
            } => {
                writer.write_u8(TAG_RPC_CALL);
                let target_pos = writer.len();
                writer.write_u32_le(0);
                writer.write_str_nul(member)?;
                writer.write_u8(*argc);
                writer.write_bytes(args);
                Self::patch_target(&mut writer, target_pos, target)?;
            }
            Packet::RpcSet {
                target,
                member,
                value,
            } => {
                writer.write_u8(TAG_RPC_SET);
                let target_pos = writer.len();
                writer.write_u32_le(0);
                writer.write_str_nul(member)?;
                writer.write_bytes(value);
                Self::patch_target(&mut writer, target_pos, target)?;
            }
        }
        Ok(writer.into_bytes())
    }

    // The target word is written last: in the fallback form its value is
    // the offset of the path tail, which is only known once the payload has
    // been written.
    fn patch_target(
        writer: &mut ByteWriter,
        target_pos: usize,
        target: &RpcTarget,
    ) -> Result<(), PacketError> {
        match target {
            RpcTarget::Id(id) => {
                writer.patch_u32_le(target_pos, id.value());
            }
            RpcTarget::Path(path) => {
                let offset = writer.len();
                writer.write_str_nul(path.as_str())?;
                writer.patch_u32_le(target_pos, FALLBACK_BIT | offset as u32);
            }
        }
        Ok(())
    }

    pub fn de(bytes: &[u8]) -> Result<Self, PacketError> {
        let mut reader = ByteReader::new(bytes);
        let tag = reader.read_u8()?;
        match tag {
            TAG_PATH_ASSIGN => {
                let id = PathId::new(reader.read_u32_le()?);
                let path = ObjectPath::new(reader.read_str_nul()?);
                Ok(Packet::PathAssign { id, path })
            }
            TAG_PATH_ACK => {
                let path = ObjectPath::new(reader.read_str_nul()?);
                Ok(Packet::PathAck { path })
            }
            TAG_RPC_CALL => {
                let target_raw = reader.read_u32_le()?;
                let member = reader.read_str_nul()?.to_string();
                let argc = reader.read_u8()?;
                let (payload, target) = Self::read_payload_and_target(&mut reader, target_raw)?;
                if payload.len() < argc as usize || (argc == 0 && !payload.is_empty()) {
                    return Err(PacketError::BadArgCount {
                        argc,
                        remaining: payload.len(),
                    });
                }
                Ok(Packet::RpcCall {
                    target,
                    member,
                    argc,
                    args: payload.to_vec(),
                })
            }
            TAG_RPC_SET => {
                let target_raw = reader.read_u32_le()?;
                let member = reader.read_str_nul()?.to_string();
                let (payload, target) = Self::read_payload_and_target(&mut reader, target_raw)?;
                Ok(Packet::RpcSet {
                    target,
                    member,
                    value: payload.to_vec(),
                })
            }
            tag => Err(PacketError::UnknownTag { tag }),
        }
    }

    // Payload extends from the cursor to the fallback path offset (fallback
    // form) or to the end of the packet (compact form).
    fn read_payload_and_target<'a>(
        reader: &mut ByteReader<'a>,
        target_raw: u32,
    ) -> Result<(&'a [u8], RpcTarget), PacketError> {
        if target_raw & FALLBACK_BIT != 0 {
            let offset = (target_raw & !FALLBACK_BIT) as usize;
            let payload = reader.take_until(offset)?;
            let path = ObjectPath::new(reader.read_str_nul()?);
            Ok((payload, RpcTarget::Path(path)))
        } else {
            let payload = reader.take_rest();
            Ok((payload, RpcTarget::Id(PathId::new(target_raw))))
        }
    }
}
