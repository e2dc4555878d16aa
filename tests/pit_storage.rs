use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;

use pits::{
    list_snapshots, parse_point_in_time, resolve_for_read, resolve_for_write, with_reader,
    with_writer, PitError, PointInTime, StreamOptions,
};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("pitstest-storage-{prefix}-{pid}-{t}-{id}"))
}

fn put(dir: &PathBuf, at: &str, data: &[u8], gzip: bool) -> Result<PathBuf> {
    let pit = parse_point_in_time(Some(at))?;
    let h = resolve_for_write(dir, pit)?;
    let opts = StreamOptions::default().with_compress(gzip);
    with_writer(&h, &opts, |w| -> Result<()> {
        w.write_all(data)?;
        Ok(())
    })?;
    Ok(h.path().to_path_buf())
}

fn get(dir: &PathBuf, at: &str) -> Result<Vec<u8>> {
    let pit = parse_point_in_time(Some(at))?;
    let h = resolve_for_read(dir, pit)?;
    with_reader(&h, &StreamOptions::default(), |r| -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        r.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

#[test]
fn write_then_read_respects_query_time() -> Result<()> {
    let root = unique_root("wr");
    put(&root, "2024-06-15 08:00:00", b"v1", false)?;

    // Q >= P
    assert_eq!(get(&root, "2024-06-15 08:00:00")?, b"v1");
    assert_eq!(get(&root, "2024-06-15")?, b"v1");
    assert_eq!(get(&root, "2030-01-01")?, b"v1");

    // Q < P
    let q = parse_point_in_time(Some("2024-06-15 07:59:59"))?;
    match resolve_for_read(&root, q) {
        Err(PitError::NoSnapshotFound { pit, dir }) => {
            assert_eq!(pit, q);
            assert_eq!(dir, root);
        }
        other => panic!("expected NoSnapshotFound, got {other:?}"),
    }

    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn latest_eligible_snapshot_wins() -> Result<()> {
    let root = unique_root("latest");
    put(&root, "2024.01.01-00:00:00", b"jan", false)?;
    put(&root, "2024.06.01-00:00:00", b"jun", true)?;
    put(&root, "2025.01.01-00:00:00", b"next-year", false)?;
    fs::write(root.join("notes.txt"), b"not a snapshot")?;
    fs::create_dir_all(root.join("archive"))?;

    let q = parse_point_in_time(Some("2024.12.31-23:59:59"))?;
    let h = resolve_for_read(&root, q)?;
    assert_eq!(h.path(), root.join("2024.06.01-00:00:00"));
    assert_eq!(get(&root, "2024.12.31-23:59:59")?, b"jun");

    // date-only query covers the whole day
    put(&root, "2024.03.10-23:59:58", b"late", false)?;
    assert_eq!(get(&root, "2024-03-10")?, b"late");
    assert_eq!(get(&root, "2024-03-10 12")?, b"jan");

    let names: Vec<String> = list_snapshots(&root)?
        .into_iter()
        .map(|s| s.pit.to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "2024.01.01-00:00:00",
            "2024.03.10-23:59:58",
            "2024.06.01-00:00:00",
            "2025.01.01-00:00:00",
        ]
    );

    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn gzip_detected_without_caller_hint() -> Result<()> {
    let root = unique_root("gz");
    let text = "line\n".repeat(1000);
    let path = put(&root, "20240615", text.as_bytes(), true)?;

    let raw = fs::read(&path)?;
    assert!(raw.len() < text.len());
    assert_eq!(&raw[..2], &[0x1fu8, 0x8bu8][..]);

    let h = resolve_for_read(&root, PointInTime::parse_spec("20240616")?)?;
    assert!(h.is_gzipped()?);
    assert_eq!(get(&root, "20240616")?, text.as_bytes());

    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn error_kinds_for_bad_directories() -> Result<()> {
    let root = unique_root("errs");
    let pit = PointInTime::parse_spec("20240101")?;

    assert!(matches!(
        resolve_for_read(&root, pit),
        Err(PitError::NotFound { .. })
    ));

    fs::create_dir_all(&root)?;
    let plain = root.join("plain-file");
    fs::write(&plain, b"x")?;
    assert!(matches!(
        resolve_for_write(&plain, pit),
        Err(PitError::NotADirectory { .. })
    ));
    assert!(matches!(
        resolve_for_read(&plain, pit),
        Err(PitError::NotADirectory { .. })
    ));

    // empty dir
    let empty = root.join("empty");
    fs::create_dir_all(&empty)?;
    assert!(matches!(
        resolve_for_read(&empty, pit),
        Err(PitError::NoSnapshotFound { .. })
    ));

    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[cfg(unix)]
#[test]
fn read_follows_directory_symlink() -> Result<()> {
    let root = unique_root("link");
    let real = root.join("real");
    put(&real, "20240101120000", b"via-link", false)?;
    let link = root.join("link");
    std::os::unix::fs::symlink(&real, &link)?;

    assert_eq!(get(&link, "20240102")?, b"via-link");

    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn invalid_specs_are_typed() {
    for s in ["2024", "2024-13-01", "2024-00-10", "yesterday"] {
        match parse_point_in_time(Some(s)) {
            Err(PitError::InvalidSpec { spec, .. }) => assert_eq!(spec, s),
            other => panic!("{s:?}: expected InvalidSpec, got {other:?}"),
        }
    }
}
