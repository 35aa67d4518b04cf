use std::sync::Arc;

use birthrate_charts::{CacheOutcome, DatasetCache, LoaderConfig, Result};

use crate::utils::{SAMPLE_CSV, write_fixture};

#[test]
fn test_unchanged_source_is_reused() -> Result<()> {
    let fixture = write_fixture("cache-hit", "fertility.csv", SAMPLE_CSV);
    let path = fixture.path();
    let cache = DatasetCache::new(LoaderConfig::default());

    let (first, outcome) = cache.load_with_outcome(path)?;
    assert_eq!(outcome, CacheOutcome::Miss);
    let (second, outcome) = cache.load_with_outcome(path)?;
    assert_eq!(outcome, CacheOutcome::Hit);

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
    Ok(())
}

#[test]
fn test_changed_content_reloads() -> Result<()> {
    let fixture = write_fixture("cache-stale", "fertility.csv", SAMPLE_CSV);
    let path = fixture.path();
    let cache = DatasetCache::default();
    let first = cache.load(path)?;

    let extended = format!("{SAMPLE_CSV}Mexico,Latin America & Caribbean,1990,3.3,86000000\n");
    std::fs::write(path, extended)?;

    let (second, outcome) = cache.load_with_outcome(path)?;
    assert_eq!(outcome, CacheOutcome::Stale);
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(second.len(), first.len() + 1);
    assert_eq!(cache.len(), 1);
    Ok(())
}

#[test]
fn test_invalidate_forces_reload() -> Result<()> {
    let fixture = write_fixture("cache-invalidate", "fertility.csv", SAMPLE_CSV);
    let path = fixture.path();
    let cache = DatasetCache::default();
    let first = cache.load(path)?;

    assert!(cache.invalidate(path)?);
    assert!(!cache.invalidate(path)?);
    assert!(cache.is_empty());

    let (second, outcome) = cache.load_with_outcome(path)?;
    assert_eq!(outcome, CacheOutcome::Miss);
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.records(), second.records());

    cache.clear()?;
    assert!(cache.is_empty());
    Ok(())
}

#[test]
fn test_failed_load_is_not_cached() {
    let fixture = write_fixture("cache-error", "fertility.csv", "name,region\nMexico,Latin America & Caribbean\n");
    let path = fixture.path();
    let cache = DatasetCache::default();

    assert!(cache.load(path).is_err());
    assert!(cache.is_empty());
}
