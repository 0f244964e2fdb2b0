//! End-to-end staging pipeline over a tempdir fixture.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use llgo_stage::{
    BuildConfig, ListingResolver, StageError, move_artifact, package_from_files,
    translate_gccgo_externs,
};

/// Test context that stands in for a build driver's scratch area.
struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        Self { temp_dir }
    }

    fn write(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(&path, content).expect("failed to write file");
        path
    }
}

#[test]
fn test_stage_named_files_for_build() {
    let ctx = TestContext::new();
    let main = ctx.write("main.go", b"package main\n\nfunc main() {}\n");
    let ffi = ctx.write(
        "ffi.go",
        b"package main\n\n//extern putchar\nfunc putchar(c int) int\n",
    );

    let pkg = package_from_files(
        &[main.clone(), ffi.clone()],
        &BuildConfig::default(),
        &ListingResolver,
    )
    .expect("staging named files should succeed");

    assert_eq!(pkg.dir(), ctx.temp_dir.path());
    assert_eq!(pkg.files(), ["main.go", "ffi.go"]);
    assert!(pkg.use_all_files());

    for path in pkg.paths() {
        translate_gccgo_externs(&path).expect("translation should succeed");
    }

    let translated = fs::read(&ffi).expect("failed to read back ffi.go");
    assert_eq!(
        translated,
        b"package main\n\n// #llgo name: putchar\nfunc putchar(c int) int\n"
    );
    let untouched = fs::read(&main).expect("failed to read back main.go");
    assert_eq!(untouched, b"package main\n\nfunc main() {}\n");
}

#[test]
fn test_named_files_must_share_a_directory() {
    let ctx = TestContext::new();
    let first = ctx.write("a/x.go", b"package a\n");
    let second = ctx.write("b/y.go", b"package a\n");

    let err = package_from_files(&[first, second], &BuildConfig::default(), &ListingResolver)
        .expect_err("files from two directories should be rejected");
    assert!(
        matches!(err, StageError::InvalidInput { .. }),
        "expected invalid input, got: {err}"
    );
    assert!(err.to_string().contains("must all be in one directory"));
}

#[test]
fn test_relocate_artifact_into_output_dir() {
    let ctx = TestContext::new();
    let built = ctx.write("work/a.out", b"\x7fELF artifact");
    let out_dir = ctx.temp_dir.path().join("out");
    fs::create_dir(&out_dir).expect("failed to create output dir");
    let dest = out_dir.join("program");

    move_artifact(&built, &dest, true).expect("relocation should succeed");

    assert!(!built.exists(), "source should be gone after relocation");
    assert_eq!(fs::read(&dest).expect("failed to read artifact"), b"\x7fELF artifact");
}

#[test]
fn test_toolchain_lookup_with_stub_compiler() {
    // `echo` answers with a bare file name, which resolves to the
    // current directory.
    let config = BuildConfig {
        cc: "echo".to_string(),
        ..BuildConfig::default()
    };
    let dir = llgo_stage::find_gcclib(&config).expect("lookup should succeed");
    assert_eq!(dir, PathBuf::from("."));
}
