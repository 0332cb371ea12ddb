use sat_tracker_init::core::registry::FileListingLoader;
use sat_tracker_init::core::AppContext;
use sat_tracker_init::{
    BundledContext, DataContext, DataProvidersManager, DirAssetSource, InitOptions,
    OrbitDataInitializer, ZipAssetSource,
};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::{FileOptions, ZipWriter};

const BUNDLE: &[(&str, &[u8])] = &[
    ("orekit-data/tai-utc.dat", b" 1961 JAN  1 =JD 2437300.5  TAI-UTC=   1.4228180 S"),
    ("orekit-data/UTC-TAI.history", b"1972 Jan  1  10s"),
    (
        "orekit-data/Earth-Orientation-Parameters/IAU-2000/finals2000A.all",
        b"73 1 2 41684.00 I  0.120733",
    ),
    ("orekit-data/MSAFE/jan2024f10_prd.txt", b"TABLE 3"),
    ("orekit-data/Potential/eigen-6s4v2.gfc", b"product_type gravity_field"),
];

fn write_dir_bundle(root: &Path) {
    for (name, content) in BUNDLE {
        let path = root.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

fn write_zip_bundle(path: &Path) {
    let file = fs::File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    for (name, content) in BUNDLE {
        zip.start_file::<_, ()>(*name, FileOptions::default()).unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap();
}

/// Relative path -> bytes of every file under `root`.
fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<String, Vec<u8>>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).unwrap();
                let key = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/");
                out.insert(key, fs::read(&path).unwrap());
            }
        }
    }

    let mut out = BTreeMap::new();
    walk(root, root, &mut out);
    out
}

/// The asset root keeps its name below the data dir.
fn expected_tree() -> BTreeMap<String, Vec<u8>> {
    BUNDLE
        .iter()
        .map(|(name, content)| (name.to_string(), content.to_vec()))
        .collect()
}

#[test]
fn test_every_leaf_file_is_copied_from_directory_bundle() {
    let assets = TempDir::new().unwrap();
    let files = TempDir::new().unwrap();
    write_dir_bundle(assets.path());

    let ctx = BundledContext::new(files.path(), Box::new(DirAssetSource::new(assets.path())));
    let manager = DataProvidersManager::new();
    let outcome = OrbitDataInitializer::new(InitOptions::default(), &manager)
        .run(&ctx)
        .unwrap();

    assert!(outcome.provision.copied);
    assert_eq!(outcome.provision.files_copied, BUNDLE.len());
    assert_eq!(snapshot(&outcome.data_dir), expected_tree());
}

#[test]
fn test_every_leaf_file_is_copied_from_zip_bundle() {
    let assets = TempDir::new().unwrap();
    let files = TempDir::new().unwrap();
    let apk = assets.path().join("app.apk");
    write_zip_bundle(&apk);

    let ctx = BundledContext::from_bundle(files.path(), &apk).unwrap();
    let manager = DataProvidersManager::new();
    let outcome = OrbitDataInitializer::new(InitOptions::default(), &manager)
        .run(&ctx)
        .unwrap();

    assert_eq!(snapshot(&outcome.data_dir), expected_tree());
    assert_eq!(
        outcome.provision.bytes_copied,
        BUNDLE.iter().map(|(_, c)| c.len() as u64).sum::<u64>()
    );
}

#[test]
fn test_second_run_copies_nothing() {
    let assets = TempDir::new().unwrap();
    let files = TempDir::new().unwrap();
    write_dir_bundle(assets.path());

    let ctx = BundledContext::new(files.path(), Box::new(DirAssetSource::new(assets.path())));
    let manager = DataProvidersManager::new();
    let initializer = OrbitDataInitializer::new(InitOptions::default(), &manager);

    let first = initializer.run(&ctx).unwrap();
    assert!(first.provision.copied);

    // Local edits must survive a restart.
    let tai_utc = first.data_dir.join("orekit-data").join("tai-utc.dat");
    fs::write(&tai_utc, b"locally updated").unwrap();

    let second = initializer.run(&ctx).unwrap();
    assert!(!second.provision.copied);
    assert_eq!(second.provision.files_copied, 0);
    assert_eq!(fs::read(&tai_utc).unwrap(), b"locally updated");
    assert_eq!(second.providers_registered, 1);
}

#[test]
fn test_empty_existing_directory_is_provisioned() {
    let assets = TempDir::new().unwrap();
    let files = TempDir::new().unwrap();
    write_dir_bundle(assets.path());
    fs::create_dir_all(files.path().join("orekit-data")).unwrap();

    let ctx = BundledContext::new(files.path(), Box::new(DirAssetSource::new(assets.path())));
    let manager = DataProvidersManager::new();
    let outcome = OrbitDataInitializer::new(InitOptions::default(), &manager)
        .run(&ctx)
        .unwrap();

    assert!(outcome.provision.copied);
    assert_eq!(snapshot(&outcome.data_dir), expected_tree());
}

#[test]
fn test_registered_directory_serves_data_files() {
    let assets = TempDir::new().unwrap();
    let files = TempDir::new().unwrap();
    write_dir_bundle(assets.path());

    let ctx = BundledContext::new(files.path(), Box::new(DirAssetSource::new(assets.path())));
    let manager = DataProvidersManager::new();
    OrbitDataInitializer::new(InitOptions::default(), &manager)
        .run(&ctx)
        .unwrap();

    let mut loader = FileListingLoader::new();
    assert!(manager.feed(r"finals2000A\..*", &mut loader).unwrap());
    assert_eq!(loader.files, vec![("finals2000A.all".to_string(), 27)]);
}

#[test]
fn test_global_hook_registers_with_default_context() {
    let assets = TempDir::new().unwrap();
    let files = TempDir::new().unwrap();
    write_dir_bundle(assets.path());

    let ctx = BundledContext::new(files.path(), Box::new(DirAssetSource::new(assets.path())));
    sat_tracker_init::init_orbit_data(&ctx);

    let data_dir = ctx.files_dir().join("orekit-data");
    let description = format!("directory:{}", data_dir.display());
    assert!(DataContext::global()
        .providers_manager()
        .is_registered(&description));
}

#[test]
fn test_corrupt_archive_is_rejected() {
    let assets = TempDir::new().unwrap();
    let apk = assets.path().join("broken.zip");
    fs::write(&apk, b"definitely not a zip file").unwrap();

    assert!(BundledContext::from_bundle(assets.path(), &apk).is_err());
    assert!(ZipAssetSource::open_file(&apk).is_err());
}

#[test]
fn test_failed_copy_keeps_partial_tree_and_registers_nothing() {
    let assets = TempDir::new().unwrap();
    let files = TempDir::new().unwrap();
    let bundled = assets.path().join("orekit-data");
    fs::create_dir_all(bundled.join("empty")).unwrap();
    fs::write(bundled.join("a.dat"), b"first").unwrap();
    fs::write(bundled.join("zz.dat"), b"last").unwrap();

    let ctx = BundledContext::new(files.path(), Box::new(DirAssetSource::new(assets.path())));
    sat_tracker_init::init_orbit_data(&ctx);

    let data_dir = files.path().join("orekit-data");
    let copied_root = data_dir.join("orekit-data");
    assert_eq!(fs::read(copied_root.join("a.dat")).unwrap(), b"first");
    assert!(!copied_root.join("empty").exists());
    assert!(!copied_root.join("zz.dat").exists());

    let description = format!("directory:{}", data_dir.display());
    assert!(!DataContext::global()
        .providers_manager()
        .is_registered(&description));

    // The partial tree counts as populated, so a restart does not copy again.
    let manager = DataProvidersManager::new();
    let retry = OrbitDataInitializer::new(InitOptions::default(), &manager)
        .run(&ctx)
        .unwrap();
    assert!(!retry.provision.copied);
    assert!(!copied_root.join("zz.dat").exists());
}
