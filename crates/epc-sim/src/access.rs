//! Per-operation access semantics
//!
//! Each function here is a pure function of one tag and one operation: it
//! enforces password and lock rules, mutates the tag in place where the
//! operation calls for it and reports the outcome as a result code.
//! Persisting a mutated tag is the caller's job.

use epc_tag::bank::WORD_BYTES;
use epc_tag::{
    KillOperation, KillResult, KillStatus, LockField, LockOperation, LockResult, LockStatus,
    LockState, MemoryBank, ReadOperation, ReadResult, ReadStatus, Tag, WriteOperation, WriteResult,
    WriteStatus,
};
use tracing::debug;

/// Word boundary separating the kill password (words 0-1) from the access
/// password (words 2-3) within the PASSWORD bank
const PASSWORD_BOUNDARY_WORDS: usize = 2;

/// Lock field guarding a read of the PASSWORD bank
fn read_lock_field(op: &ReadOperation) -> LockField {
    if op.word_offset + op.word_count > PASSWORD_BOUNDARY_WORDS {
        LockField::AccessPassword
    } else {
        LockField::KillPassword
    }
}

/// Lock field guarding a write, if the target bank has one
fn write_lock_field(op: &WriteOperation) -> Option<LockField> {
    match op.bank {
        MemoryBank::Password => {
            let words = op.data.len() / WORD_BYTES;
            if op.word_offset + words > PASSWORD_BOUNDARY_WORDS {
                Some(LockField::AccessPassword)
            } else {
                Some(LockField::KillPassword)
            }
        }
        bank => LockField::for_bank(bank),
    }
}

/// Execute a read operation
///
/// Locks only guard reads of the PASSWORD bank; every other bank is readable
/// regardless of lock state. A supplied password that contradicts a non-zero
/// stored access password fails before any lock check.
pub fn read(tag: &Tag, op: &ReadOperation) -> ReadResult {
    let stored = tag.access_password();

    if op.password != 0 && stored != 0 && op.password != stored {
        return ReadResult {
            operation_id: op.id.clone(),
            data: Vec::new(),
            status: ReadStatus::IncorrectPassword,
        };
    }

    if op.bank == MemoryBank::Password {
        let field = read_lock_field(op);
        if tag.lock_state(field).is_some_and(|s| s.locked) && stored != op.password {
            let status = if op.password == 0 {
                ReadStatus::MemoryLocked
            } else {
                ReadStatus::IncorrectPassword
            };
            return ReadResult {
                operation_id: op.id.clone(),
                data: Vec::new(),
                status,
            };
        }
    }

    let data = tag.bank(op.bank).unwrap_or(&[]);
    let start = op.word_offset * WORD_BYTES;
    let slice = if op.word_count > 0 {
        data.get(start..start + op.word_count * WORD_BYTES)
    } else {
        data.get(start..)
    };

    match slice {
        Some(bytes) => ReadResult {
            operation_id: op.id.clone(),
            data: bytes.to_vec(),
            status: ReadStatus::Success,
        },
        None => ReadResult {
            operation_id: op.id.clone(),
            data: Vec::new(),
            status: ReadStatus::MemoryOverrun,
        },
    }
}

/// Execute a write operation, mutating the tag on success
///
/// The TID bank never accepts writes. Writing into an empty bank initializes
/// it, zero-filling any gap before the offset; writing into a populated bank
/// must stay within its original length.
pub fn write(tag: &mut Tag, op: &WriteOperation) -> WriteResult {
    if op.bank == MemoryBank::Tid {
        return WriteResult {
            operation_id: op.id.clone(),
            words_written: 0,
            status: WriteStatus::MemoryLocked,
        };
    }

    let stored = tag.access_password();
    let locked = write_lock_field(op)
        .and_then(|field| tag.lock_state(field))
        .is_some_and(|s| s.locked);

    if locked {
        if stored != 0 {
            if op.password == 0 {
                return WriteResult {
                    operation_id: op.id.clone(),
                    words_written: 0,
                    status: WriteStatus::MemoryLocked,
                };
            }
            if op.password != stored {
                return WriteResult {
                    operation_id: op.id.clone(),
                    words_written: 0,
                    status: WriteStatus::IncorrectPassword,
                };
            }
        } else if op.password != 0 {
            return WriteResult {
                operation_id: op.id.clone(),
                words_written: 0,
                status: WriteStatus::IncorrectPassword,
            };
        }
    } else if op.password != 0 && op.password != stored {
        return WriteResult {
            operation_id: op.id.clone(),
            words_written: 0,
            status: WriteStatus::IncorrectPassword,
        };
    }

    let byte_offset = op.word_offset * WORD_BYTES;
    let original = tag.bank(op.bank).unwrap_or(&[]);

    let new_data = if original.is_empty() {
        splice(original, &op.data, byte_offset)
    } else {
        if byte_offset + op.data.len() > original.len() {
            return WriteResult {
                operation_id: op.id.clone(),
                words_written: 0,
                status: WriteStatus::MemoryOverrun,
            };
        }
        splice(original, &op.data, byte_offset)
    };

    debug!(
        "write {}: {} word(s) at word {} of {}",
        op.id,
        op.data.len() / WORD_BYTES,
        op.word_offset,
        op.bank.name()
    );
    tag.set_bank(op.bank, new_data);

    WriteResult {
        operation_id: op.id.clone(),
        words_written: (op.data.len() / WORD_BYTES) as u16,
        status: WriteStatus::Success,
    }
}

/// Execute a lock operation, mutating the tag's lock table on success
///
/// Authentication uses the kill-password slot (PASSWORD bank words 0-1);
/// the simulated hardware has no separate lock password. A transition
/// rejected by the lock state machine reports as locked memory.
pub fn lock(tag: &mut Tag, op: &LockOperation) -> LockResult {
    let stored = tag.kill_password();

    if stored != 0 {
        if op.password == 0 {
            return LockResult {
                operation_id: op.id.clone(),
                status: LockStatus::MemoryLocked,
            };
        }
        if op.password != stored {
            return LockResult {
                operation_id: op.id.clone(),
                status: LockStatus::IncorrectPassword,
            };
        }
    } else if op.password != 0 {
        return LockResult {
            operation_id: op.id.clone(),
            status: LockStatus::IncorrectPassword,
        };
    }

    let next = match tag.lock_state(op.field) {
        Some(state) => match state.apply(op.privilege) {
            Ok(next) => next,
            Err(err) => {
                debug!("lock {}: {} on {}", op.id, err, op.field.name());
                return LockResult {
                    operation_id: op.id.clone(),
                    status: LockStatus::MemoryLocked,
                };
            }
        },
        None => LockState::from_privilege(op.privilege),
    };

    tag.locks.insert(op.field, next);

    LockResult {
        operation_id: op.id.clone(),
        status: LockStatus::Success,
    }
}

/// Execute a kill operation, mutating the tag on success
pub fn kill(tag: &mut Tag, op: &KillOperation) -> KillResult {
    if op.kill_password == 0 {
        return KillResult {
            operation_id: op.id.clone(),
            status: KillStatus::ZeroKillPassword,
        };
    }

    if op.kill_password != tag.kill_password() {
        return KillResult {
            operation_id: op.id.clone(),
            status: KillStatus::IncorrectPassword,
        };
    }

    tag.killed = true;
    debug!("kill {}: tag {} silenced", op.id, tag.id);

    KillResult {
        operation_id: op.id.clone(),
        status: KillStatus::Success,
    }
}

/// Overwrite `data` into `original` at `byte_offset`
///
/// Within the original the bytes are replaced in place; past its end the gap
/// is zero-filled and the data appended. The result never shrinks.
fn splice(original: &[u8], data: &[u8], byte_offset: usize) -> Vec<u8> {
    if byte_offset < original.len() {
        let mut out = original[..byte_offset].to_vec();
        out.extend_from_slice(data);
        if byte_offset + data.len() < original.len() {
            out.extend_from_slice(&original[byte_offset + data.len()..]);
        }
        out
    } else {
        let mut out = original.to_vec();
        out.resize(byte_offset, 0);
        out.extend_from_slice(data);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epc_tag::Privilege;

    /// Tag with kill password 0x11223344 and access password 0xaabbccdd
    fn test_tag() -> Tag {
        let mut tag = Tag::new("tag-1");
        tag.observe(1, 42);
        tag.set_bank(
            MemoryBank::Password,
            hex::decode("11223344aabbccdd").unwrap(),
        );
        tag.set_bank(
            MemoryBank::Epc,
            hex::decode("12343400aaaabbbbccccddddeeeeffff").unwrap(),
        );
        tag.set_bank(MemoryBank::Tid, hex::decode("e28011052000324ddf740012").unwrap());
        tag.set_bank(MemoryBank::User, hex::decode("aaaabbbbccccddddeeeeffff").unwrap());
        tag
    }

    fn read_op(bank: MemoryBank, offset: usize, count: usize, password: u32) -> ReadOperation {
        ReadOperation {
            id: "rd".to_string(),
            bank,
            word_offset: offset,
            word_count: count,
            password,
        }
    }

    fn write_op(bank: MemoryBank, offset: usize, data: &str, password: u32) -> WriteOperation {
        WriteOperation {
            id: "wr".to_string(),
            bank,
            word_offset: offset,
            data: hex::decode(data).unwrap(),
            password,
        }
    }

    #[test]
    fn test_read_epc_slice() {
        let tag = test_tag();
        let res = read(&tag, &read_op(MemoryBank::Epc, 2, 6, 0));

        assert_eq!(res.status, ReadStatus::Success);
        assert_eq!(res.operation_id, "rd");
        assert_eq!(res.data, hex::decode("aaaabbbbccccddddeeeeffff").unwrap());
    }

    #[test]
    fn test_read_wrong_password() {
        let tag = test_tag();
        let res = read(&tag, &read_op(MemoryBank::Epc, 2, 6, 0x1111_1111));
        assert_eq!(res.status, ReadStatus::IncorrectPassword);
    }

    #[test]
    fn test_read_locked_password_bank() {
        let mut tag = test_tag();
        tag.locks.insert(
            LockField::KillPassword,
            LockState { locked: true, permanent: false },
        );

        // kill-password words, no password
        let res = read(&tag, &read_op(MemoryBank::Password, 0, 2, 0));
        assert_eq!(res.status, ReadStatus::MemoryLocked);

        // correct access password unlocks the read
        let res = read(&tag, &read_op(MemoryBank::Password, 0, 2, 0xAABB_CCDD));
        assert_eq!(res.status, ReadStatus::Success);
        assert_eq!(res.data, hex::decode("11223344").unwrap());

        // stored access password zeroed out: a wrong non-zero password fails
        tag.set_bank(
            MemoryBank::Password,
            hex::decode("1122334400000000").unwrap(),
        );
        let res = read(&tag, &read_op(MemoryBank::Password, 0, 2, 0x1111_1111));
        assert_eq!(res.status, ReadStatus::IncorrectPassword);
    }

    #[test]
    fn test_read_lock_ignored_on_other_banks() {
        let mut tag = test_tag();
        tag.locks.insert(
            LockField::UserBank,
            LockState { locked: true, permanent: false },
        );

        let res = read(&tag, &read_op(MemoryBank::User, 0, 0, 0));
        assert_eq!(res.status, ReadStatus::Success);
    }

    #[test]
    fn test_read_to_end_and_overrun() {
        let tag = test_tag();

        let res = read(&tag, &read_op(MemoryBank::User, 0, 0, 0));
        assert_eq!(res.status, ReadStatus::Success);
        assert_eq!(res.data, hex::decode("aaaabbbbccccddddeeeeffff").unwrap());

        let res = read(&tag, &read_op(MemoryBank::User, 0, 100, 0));
        assert_eq!(res.status, ReadStatus::MemoryOverrun);

        let res = read(&tag, &read_op(MemoryBank::User, 100, 0, 0));
        assert_eq!(res.status, ReadStatus::MemoryOverrun);
    }

    #[test]
    fn test_read_absent_bank() {
        let mut tag = test_tag();
        tag.memory_banks.remove(&MemoryBank::User);

        let res = read(&tag, &read_op(MemoryBank::User, 0, 0, 0));
        assert_eq!(res.status, ReadStatus::Success);
        assert!(res.data.is_empty());

        let res = read(&tag, &read_op(MemoryBank::User, 0, 1, 0));
        assert_eq!(res.status, ReadStatus::MemoryOverrun);
    }

    #[test]
    fn test_write_tid_always_locked() {
        let mut tag = test_tag();
        let res = write(&mut tag, &write_op(MemoryBank::Tid, 0, "aabbccdd", 0));
        assert_eq!(res.status, WriteStatus::MemoryLocked);
    }

    #[test]
    fn test_write_in_place() {
        let mut tag = test_tag();
        let res = write(&mut tag, &write_op(MemoryBank::User, 2, "11112222", 0));

        assert_eq!(res.status, WriteStatus::Success);
        assert_eq!(res.words_written, 2);
        assert_eq!(
            tag.bank(MemoryBank::User).unwrap(),
            &hex::decode("aaaabbbb11112222eeeeffff").unwrap()[..]
        );
    }

    #[test]
    fn test_write_locked_bank_password_rules() {
        let mut tag = test_tag();
        tag.locks.insert(
            LockField::UserBank,
            LockState { locked: true, permanent: false },
        );

        // stored access password set, none supplied
        let res = write(&mut tag, &write_op(MemoryBank::User, 2, "11112222", 0));
        assert_eq!(res.status, WriteStatus::MemoryLocked);

        // wrong password
        let res = write(&mut tag, &write_op(MemoryBank::User, 2, "11112222", 0x1111_1111));
        assert_eq!(res.status, WriteStatus::IncorrectPassword);

        // stored password cleared: a non-zero password is wrong by definition
        tag.set_bank(
            MemoryBank::Password,
            hex::decode("1122334400000000").unwrap(),
        );
        let res = write(&mut tag, &write_op(MemoryBank::User, 2, "11112222", 0x1111_1111));
        assert_eq!(res.status, WriteStatus::IncorrectPassword);

        // matching password unlocks the write
        tag.set_bank(
            MemoryBank::Password,
            hex::decode("11223344aabbccdd").unwrap(),
        );
        let res = write(&mut tag, &write_op(MemoryBank::User, 2, "11112222", 0xAABB_CCDD));
        assert_eq!(res.status, WriteStatus::Success);
    }

    #[test]
    fn test_write_unlocked_password_must_still_match() {
        let mut tag = test_tag();
        let res = write(&mut tag, &write_op(MemoryBank::User, 2, "11112222", 0x1111_1111));
        assert_eq!(res.status, WriteStatus::IncorrectPassword);
    }

    #[test]
    fn test_write_never_grows_a_populated_bank() {
        let mut tag = test_tag();
        let res = write(&mut tag, &write_op(MemoryBank::User, 32, "11112222", 0));

        assert_eq!(res.status, WriteStatus::MemoryOverrun);
        // untouched
        assert_eq!(
            tag.bank(MemoryBank::User).unwrap(),
            &hex::decode("aaaabbbbccccddddeeeeffff").unwrap()[..]
        );
    }

    #[test]
    fn test_write_initializes_empty_bank_with_zero_fill() {
        let mut tag = test_tag();
        tag.memory_banks.remove(&MemoryBank::User);

        let res = write(
            &mut tag,
            &write_op(MemoryBank::User, 1, "111122223333444455556666777788889999", 0),
        );

        assert_eq!(res.status, WriteStatus::Success);
        assert_eq!(res.words_written, 9);
        assert_eq!(
            tag.bank(MemoryBank::User).unwrap(),
            &hex::decode("0000111122223333444455556666777788889999").unwrap()[..]
        );
    }

    #[test]
    fn test_lock_password_rules() {
        let mut tag = test_tag();
        let mut op = LockOperation {
            id: "lk".to_string(),
            field: LockField::UserBank,
            privilege: Privilege::Lock,
            password: 0,
        };

        // kill password slot is non-zero, none supplied
        let res = lock(&mut tag, &op);
        assert_eq!(res.status, LockStatus::MemoryLocked);

        op.password = 0x4433_2211;
        let res = lock(&mut tag, &op);
        assert_eq!(res.status, LockStatus::IncorrectPassword);

        // kill password slot zeroed: any non-zero password is wrong
        tag.set_bank(
            MemoryBank::Password,
            hex::decode("00000000aabbccdd").unwrap(),
        );
        let res = lock(&mut tag, &op);
        assert_eq!(res.status, LockStatus::IncorrectPassword);

        // matching kill password authenticates the lock
        tag.set_bank(
            MemoryBank::Password,
            hex::decode("11223344aabbccdd").unwrap(),
        );
        op.password = 0x1122_3344;
        let res = lock(&mut tag, &op);
        assert_eq!(res.status, LockStatus::Success);
        assert_eq!(
            tag.lock_state(LockField::UserBank),
            Some(LockState { locked: true, permanent: false })
        );
    }

    #[test]
    fn test_lock_permalock_then_lock_fails() {
        let mut tag = test_tag();
        let mut op = LockOperation {
            id: "lk".to_string(),
            field: LockField::UserBank,
            privilege: Privilege::Permalock,
            password: 0x1122_3344,
        };

        let res = lock(&mut tag, &op);
        assert_eq!(res.status, LockStatus::Success);

        op.privilege = Privilege::Lock;
        let res = lock(&mut tag, &op);
        assert_eq!(res.status, LockStatus::MemoryLocked);
        // state unchanged
        assert_eq!(
            tag.lock_state(LockField::UserBank),
            Some(LockState { locked: true, permanent: true })
        );
    }

    #[test]
    fn test_lock_noop_transition_succeeds() {
        let mut tag = test_tag();
        tag.locks.insert(LockField::EpcBank, LockState::default());

        let op = LockOperation {
            id: "lk".to_string(),
            field: LockField::EpcBank,
            privilege: Privilege::Unlock,
            password: 0x1122_3344,
        };
        let res = lock(&mut tag, &op);

        assert_eq!(res.status, LockStatus::Success);
        assert_eq!(tag.lock_state(LockField::EpcBank), Some(LockState::default()));
    }

    #[test]
    fn test_kill_rules() {
        let mut tag = test_tag();

        let mut op = KillOperation { id: "kl".to_string(), kill_password: 0 };
        assert_eq!(kill(&mut tag, &op).status, KillStatus::ZeroKillPassword);
        assert!(!tag.killed);

        op.kill_password = 0x1111_1111;
        assert_eq!(kill(&mut tag, &op).status, KillStatus::IncorrectPassword);
        assert!(!tag.killed);

        op.kill_password = 0x1122_3344;
        assert_eq!(kill(&mut tag, &op).status, KillStatus::Success);
        assert!(tag.killed);
    }

    #[test]
    fn test_splice() {
        let orig = hex::decode("aaaa").unwrap();

        assert_eq!(splice(&orig, &hex::decode("bbbb").unwrap(), 0), hex::decode("bbbb").unwrap());
        assert_eq!(splice(&orig, &hex::decode("cccc").unwrap(), 1), hex::decode("aacccc").unwrap());
        assert_eq!(splice(&orig, &hex::decode("dddd").unwrap(), 2), hex::decode("aaaadddd").unwrap());
        assert_eq!(
            splice(&orig, &hex::decode("eeee").unwrap(), 3),
            hex::decode("aaaa00eeee").unwrap()
        );
        assert_eq!(splice(&[], &hex::decode("aaaa").unwrap(), 2), hex::decode("0000aaaa").unwrap());
    }
}
