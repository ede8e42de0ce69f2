use core_state::{Buffer, BufferPool, EditorError, OpenOutcome, POOL_CAPACITY};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::fs;

fn lines_of(b: &Buffer) -> Vec<String> {
    b.lines().map(str::to_string).collect()
}

#[test]
fn load_strips_crlf_and_save_normalizes_to_lf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crlf.txt");
    fs::write(&path, "one\r\ntwo\r\n").unwrap();
    let mut b = Buffer::load(&path).unwrap();
    assert_eq!(lines_of(&b), vec!["one", "two"]);
    b.save_to(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
}

#[test]
fn invalid_utf8_survives_load_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.txt");
    let original = b"caf\xe9\nna\xefve\n".to_vec();
    fs::write(&path, &original).unwrap();
    let mut b = Buffer::load(&path).unwrap();
    assert_eq!(lines_of(&b), vec!["caf\u{fffd}", "na\u{fffd}ve"]);
    assert!(!b.is_dirty());
    b.save_to(&path).unwrap();
    assert_eq!(fs::read(&path).unwrap(), original);
}

#[test]
fn empty_file_loads_as_single_empty_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    fs::write(&path, "").unwrap();
    let b = Buffer::load(&path).unwrap();
    assert_eq!(lines_of(&b), vec![""]);
    assert!(!b.is_dirty());
}

#[test]
fn open_existing_path_switches_instead_of_duplicating() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "alpha\n").unwrap();
    fs::write(&b, "beta\n").unwrap();
    let mut pool = BufferPool::new();
    assert!(matches!(pool.open(&a).unwrap(), OpenOutcome::Loaded(0)));
    assert!(matches!(pool.open(&b).unwrap(), OpenOutcome::Loaded(1)));
    assert!(matches!(pool.open(&a).unwrap(), OpenOutcome::Switched(0)));
    assert_eq!(pool.len(), 2);
    assert_eq!(pool.current().line(0), Some("alpha"));
}

#[test]
fn seventeenth_open_reports_pool_full() {
    let dir = tempfile::tempdir().unwrap();
    let mut pool = BufferPool::new();
    for i in 0..POOL_CAPACITY {
        let p = dir.path().join(format!("f{i}.txt"));
        fs::write(&p, format!("file {i}\n")).unwrap();
        let outcome = pool.open(&p).unwrap();
        assert_eq!(outcome.index(), i);
    }
    assert_eq!(pool.len(), POOL_CAPACITY);
    let extra = dir.path().join("extra.txt");
    fs::write(&extra, "x\n").unwrap();
    assert!(matches!(pool.open(&extra), Err(EditorError::PoolFull)));
    assert_eq!(pool.len(), POOL_CAPACITY);
    assert_eq!(pool.index(), POOL_CAPACITY - 1);
}

#[test]
fn missing_file_falls_back_to_empty_unnamed_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.txt");
    let mut pool = BufferPool::with_buffer(Buffer::from_lines(["keep"]));
    match pool.open(&missing).unwrap() {
        OpenOutcome::Created { index, error } => {
            assert_eq!(index, 1);
            assert!(matches!(error, EditorError::FileNotFound(_)));
        }
        other => panic!("expected Created, got {other:?}"),
    }
    assert!(pool.current().path().is_none());
    assert!(!pool.current().is_dirty());
    assert_eq!(lines_of(pool.current()), vec![""]);
}

#[test]
fn save_updates_path_and_clears_dirty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let mut b = Buffer::from_lines(["a"]);
    b.replace_line(0, "b".into()).unwrap();
    let mut pool = BufferPool::with_buffer(b);
    assert!(pool.current().is_dirty());
    assert_eq!(pool.save(Some(&path)).unwrap(), path);
    assert!(!pool.current().is_dirty());
    assert_eq!(pool.current().path(), Some(path.as_path()));
    assert_eq!(fs::read_to_string(&path).unwrap(), "b\n");
    // subsequent plain save reuses the stored path
    assert_eq!(pool.save(None).unwrap(), path);
}

#[test]
fn failed_save_keeps_dirty() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("no_such_dir").join("out.txt");
    let mut b = Buffer::from_lines(["a"]);
    b.replace_line(0, "b".into()).unwrap();
    assert!(matches!(b.save_to(&bad), Err(EditorError::SaveFailed { .. })));
    assert!(b.is_dirty());
    assert!(b.path().is_none());
}

proptest! {
    #[test]
    fn save_then_load_reproduces_lines(lines in proptest::collection::vec("[a-zé世 \t]{0,16}", 1..12)) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rt.txt");
        let mut b = Buffer::from_lines(lines.clone());
        b.save_to(&path).unwrap();
        let back = Buffer::load(&path).unwrap();
        prop_assert_eq!(lines_of(&back), lines);
    }

    #[test]
    fn load_then_save_reproduces_arbitrary_bytes(
        lines in proptest::collection::vec(
            proptest::collection::vec(any::<u8>().prop_filter("terminator", |b| *b != b'\n' && *b != b'\r'), 0..24),
            1..8,
        )
    ) {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.bin");
        let dst = dir.path().join("out.bin");
        let mut original = Vec::new();
        for line in &lines {
            original.extend_from_slice(line);
            original.push(b'\n');
        }
        fs::write(&src, &original).unwrap();
        let mut b = Buffer::load(&src).unwrap();
        b.save_to(&dst).unwrap();
        prop_assert_eq!(fs::read(&dst).unwrap(), original);
    }
}
