#![cfg(test)]

use std::sync::Arc;
use std::thread;

use super::*;

#[test]
fn test_create_takes_ownership() {
    let data: Box<[u8]> = Box::new(*b"abcd");
    let ptr = data.as_ptr();
    let buf = CowBuffer::new(data);

    assert_eq!(buf.as_ptr(), ptr, "Creating a buffer shouldn't copy the provided bytes.");
    assert_eq!(buf.view().as_ptr(), ptr, "A view should read straight from the storage.");
    assert_eq!(buf.share_count(), 0, "A new buffer should be the sole owner of its storage.");
    assert_eq!(buf.view(), "abcd");
}

#[test]
fn test_create_from_vec_keeps_allocation() {
    let mut data = Vec::with_capacity(4);
    data.extend_from_slice(b"abcd");
    let ptr = data.as_ptr();
    let buf = CowBuffer::new(data);

    assert_eq!(buf.as_ptr(), ptr, "A vector without spare capacity should be reused as is.");
    assert_eq!(buf.len(), 4);
    assert_eq!(buf.view(), "abcd");

    let buf = CowBuffer::new([1u8, 2, 3]);
    assert_eq!(buf.view(), [1, 2, 3]);
    assert_eq!(CowBuffer::new(&b"xy"[..]).view(), "xy");
}

#[test]
fn test_clone_shares_storage() {
    let buf = CowBuffer::from("abcd");
    let copy1 = buf.clone();
    let copy2 = buf.clone();

    assert_eq!(buf.share_count(), 2, "Two clones should leave two other sharers.");
    assert_eq!(copy1.share_count(), 2, "All sharers should see the same count.");

    assert!(buf.shares_storage_with(&copy1), "A clone should alias the original storage.");
    assert!(copy1.shares_storage_with(&copy2));
    assert_eq!(buf.as_ptr(), copy2.as_ptr());
    assert_eq!(copy2.view(), buf.view(), "A clone should see the same bytes.");
}

#[test]
fn test_detach_beyond_threshold() {
    let mut buf = CowBuffer::from("abcd");
    let copy1 = buf.clone();
    let copy2 = buf.clone();
    let shared = buf.as_ptr();

    assert!(buf.update(0, b'g'));

    assert_eq!(buf.view(), "gbcd");
    assert_eq!(copy1.view(), "abcd", "Detaching shouldn't write to the shared storage.");
    assert_eq!(copy2.view(), "abcd", "Detaching shouldn't write to the shared storage.");

    assert_ne!(buf.as_ptr(), shared, "The updated buffer should have new storage.");
    assert!(!buf.shares_storage_with(&copy1));
    assert!(copy1.shares_storage_with(&copy2), "The other handles should still share.");
    assert_eq!(copy1.as_ptr(), shared);

    assert_eq!(buf.share_count(), 0, "The detached buffer should own its new storage alone.");
    assert_eq!(copy1.share_count(), 1, "The remaining pair should have one other sharer each.");
}

#[test]
fn test_update_bounds() {
    let mut buf = CowBuffer::from("abcd");
    let ptr = buf.as_ptr();

    assert!(!buf.update(usize::MAX, b'g'), "A wrapped negative index should be rejected.");
    assert!(!buf.update(4, b'g'), "An index equal to the length should be rejected.");
    assert_eq!(
        buf.try_update(4, b'g'),
        Err(IndexOutOfBounds { index: 4, len: 4 })
    );
    assert_eq!(buf.view(), "abcd", "A rejected update shouldn't write anything.");
    assert_eq!(buf.as_ptr(), ptr);

    let mut empty = CowBuffer::from(Vec::<u8>::new());
    assert!(empty.is_empty());
    assert!(!empty.update(0, 0));
}

#[test]
fn test_rejected_update_never_detaches() {
    let mut buf = CowBuffer::from("abcd");
    let copy1 = buf.clone();
    let _copy2 = buf.clone();

    assert!(!buf.update(10, b'x'));
    assert!(
        buf.shares_storage_with(&copy1),
        "An out of bounds update shouldn't fork the storage."
    );
    assert_eq!(buf.share_count(), 2);
}

#[test]
fn test_in_place_when_sole_owner() {
    let mut buf = CowBuffer::from("abcd");
    let ptr = buf.as_ptr();

    for (i, b) in b"wxyz".iter().enumerate() {
        assert!(buf.update(i, *b));
    }

    assert_eq!(buf.as_ptr(), ptr, "A sole owner should write in place.");
    assert_eq!(buf.view(), "wxyz");
}

#[test]
fn test_independence_after_fork() {
    let mut buf = CowBuffer::from("abcd");
    let mut copy1 = buf.clone();
    let copy2 = buf.clone();

    buf.update(0, b'g');
    buf.update(1, b'h');
    assert_eq!(copy1.view(), "abcd");
    assert_eq!(copy2.view(), "abcd");

    // copy1 and copy2 now form a pair, which writes in place on their shared storage.
    copy1.update(3, b'z');
    assert_eq!(buf.view(), "ghcd", "Writes to the old storage shouldn't reach a detached buffer.");
    assert_eq!(copy2.view(), "abcz");
}

#[test]
fn test_pair_writes_in_place() {
    let mut buf = CowBuffer::from("abcd");
    let copy = buf.clone();
    let ptr = buf.as_ptr();

    assert_eq!(buf.share_count(), 1);
    assert!(buf.update(0, b'x'));

    assert_eq!(buf.as_ptr(), ptr, "With one other sharer, the write should happen in place.");
    assert!(buf.shares_storage_with(&copy));
    assert_eq!(copy.view(), "xbcd", "The write should be visible through the other handle.");
}

#[test]
fn test_reference_scenario() {
    let data: Box<[u8]> = Box::new(*b"abcd");
    let ptr = data.as_ptr();
    let mut buffer = CowBuffer::new(data);

    let copy1 = buffer.clone();
    let mut copy2 = buffer.clone();

    assert_eq!(buffer.as_ptr(), ptr);
    assert_eq!(copy1.as_ptr(), ptr);
    assert_eq!(copy2.as_ptr(), ptr);
    assert_eq!(buffer.to_string(), "abcd");

    assert!(buffer.update(0, b'g'));
    assert!(!buffer.update(usize::MAX, b'g'));
    assert!(!buffer.update(4, b'g'));

    assert_eq!(buffer.view(), b"gbcd");
    assert_eq!(copy1.view(), b"abcd");
    assert_eq!(copy2.view(), b"abcd");
    assert!(!buffer.shares_storage_with(&copy1));
    assert!(copy1.shares_storage_with(&copy2));

    copy1.close();
    assert_eq!(copy2.share_count(), 0, "Closing one of the pair should leave a sole owner.");

    let previous = copy2.as_ptr();
    assert!(copy2.update(0, b'f'));
    assert_eq!(copy2.as_ptr(), previous, "A single reference shouldn't copy during update.");
    assert_eq!(copy2.view(), "fbcd");
    assert_eq!(buffer.view(), "gbcd");

    copy2.close();
    buffer.close();
}

#[test]
fn test_close_saturates() {
    let buf = CowBuffer::from("abcd");
    let copy = buf.clone();

    assert_eq!(buf.share_count(), 1);
    drop(copy);
    assert_eq!(buf.share_count(), 0, "Dropping a handle should count as closing it.");

    let shares = Arc::clone(&buf.shares);
    buf.close();
    assert_eq!(shares.get(), 0, "Closing a sole owner shouldn't go below zero.");
    assert_eq!(shares.release(), 0);
    assert_eq!(shares.get(), 0);
}

#[test]
fn test_storage_outlives_count() {
    let buf = CowBuffer::from("abcd");
    let copy = buf.clone();
    let storage = Arc::clone(&buf.storage);

    drop(buf);
    assert_eq!(copy.share_count(), 0);
    assert_eq!(copy.view(), "abcd", "The last handle should still be able to read its bytes.");

    drop(copy);
    assert_eq!(Arc::strong_count(&storage), 1, "No handle should still hold the storage.");
}

#[test]
fn test_detached_storage_stays_alive_for_sharers() {
    let mut buf = CowBuffer::from("abcd");
    let copy1 = buf.clone();
    let copy2 = buf.clone();
    let old = Arc::downgrade(&copy1.storage);

    buf.update(0, b'g');
    drop(copy1);
    assert!(old.upgrade().is_some(), "A remaining sharer should keep the old storage alive.");

    drop(copy2);
    assert!(old.upgrade().is_none(), "The old storage should be freed with its last handle.");
    assert_eq!(buf.view(), "gbcd");
}

#[test]
fn test_view() {
    let buf = CowBuffer::from(vec![104_u8, 105, 0xff]);
    let view = buf.view();

    assert_eq!(view.len(), 3);
    assert_eq!(view.get(1), Some(105));
    assert_eq!(view.get(3), None);
    assert_eq!(view.iter().rev().collect::<Vec<_>>(), [0xff, 105, 104]);
    assert_eq!(view.to_vec(), vec![104_u8, 105, 0xff]);
    assert_eq!(view.to_string(), "hi\u{fffd}", "Invalid UTF-8 should be replaced for display.");
    assert_eq!(format!("{:?}", view), "[104, 105, 255]");

    let other = CowBuffer::from([104_u8, 105, 0xff]);
    assert_eq!(view, other.view(), "Views of equal bytes should be equal.");
    assert_eq!(buf, other);
    assert_ne!(view, b"hi".as_slice());
}

#[test]
fn test_concurrent_clone_and_close() {
    let buf = CowBuffer::from("abcd");

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                for _ in 0..1000 {
                    let copy = buf.clone();
                    assert!(copy.shares_storage_with(&buf));
                    copy.close();
                }
            });
        }
    });

    assert_eq!(buf.share_count(), 0, "Every clone was closed, so no sharers should remain.");
}

#[test]
fn test_concurrent_detach() {
    let buf = CowBuffer::from("abcd");
    let handles: Vec<_> = (0..8).map(|_| buf.clone()).collect();
    assert_eq!(buf.share_count(), 8);

    let updated: Vec<_> = thread::scope(|s| {
        let workers: Vec<_> = handles
            .into_iter()
            .enumerate()
            .map(|(i, mut handle)| s.spawn(move || {
                assert!(handle.update(0, b'0' + i as u8));
                handle
            }))
            .collect();
        workers.into_iter().filter_map(|w| w.join().ok()).collect()
    });

    assert_eq!(updated.len(), 8);
    for (i, handle) in updated.iter().enumerate() {
        assert_eq!(handle.get(0), Some(b'0' + i as u8), "Every handle should keep its own write.");
    }
    // Whichever handle saw at most one other sharer may have written in place, but no more than
    // one handle can be left on the original storage.
    assert!(updated.iter().filter(|h| h.shares_storage_with(&buf)).count() <= 1);
    assert_eq!(&buf.view().to_vec()[1..], b"bcd");
}
