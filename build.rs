use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use vergen::{BuildBuilder, CargoBuilder, Emitter, RustcBuilder};
use vergen_gitcl::{Emitter as GitEmitter, GitclBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let build = BuildBuilder::default().build_timestamp(true).build()?;

    let cargo = CargoBuilder::default()
        .opt_level(true)
        .target_triple(true)
        .build()?;

    let rustc = RustcBuilder::default()
        .semver(true)
        .channel(true)
        .build()?;

    let gitcl = GitclBuilder::default()
        .sha(true)
        .branch(true)
        .dirty(true)
        .build()?;

    Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&cargo)?
        .add_instructions(&rustc)?
        .emit()?;

    GitEmitter::default().add_instructions(&gitcl)?.emit()?;

    let target_dir = target_dir()?;
    copy_configs(&target_dir)?;
    generate_header(&target_dir);

    Ok(())
}

/// Resolves `target/{profile}` from OUT_DIR (`target/{profile}/build/tickdraw-xxx/out`)
fn target_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let out_dir = env::var("OUT_DIR")?;
    let dir = Path::new(&out_dir)
        .parent()
        .and_then(|p| p.parent())
        .and_then(|p| p.parent())
        .ok_or("Could not determine target directory")?;
    Ok(dir.to_path_buf())
}

fn copy_configs(target_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let profile = env::var("PROFILE")?;

    let config_out_dir = target_dir.join("config");
    fs::create_dir_all(&config_out_dir)?;

    // Release builds only ship release.toml
    let profiles: &[&str] = if profile == "release" {
        &["release"]
    } else {
        &["debug", "release"]
    };

    for name in profiles {
        let source = PathBuf::from(format!("config/{name}.toml"));
        if source.exists() {
            fs::copy(&source, config_out_dir.join(format!("{name}.toml")))?;
            println!("cargo:rerun-if-changed=config/{name}.toml");
        }
    }

    Ok(())
}

/// Writes `include/tickdraw.h` for scripting hosts binding the C ABI.
fn generate_header(target_dir: &Path) {
    println!("cargo:rerun-if-changed=src/ffi.rs");

    let crate_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => dir,
        Err(_) => return,
    };

    let result = cbindgen::Builder::new()
        .with_crate(crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("TICKDRAW_H")
        .with_parse_deps(false)
        .generate();

    match result {
        Ok(bindings) => {
            let include_dir = target_dir.join("include");
            if fs::create_dir_all(&include_dir).is_ok() {
                bindings.write_to_file(include_dir.join("tickdraw.h"));
            }
        }
        Err(e) => println!("cargo:warning=C header generation skipped: {e}"),
    }
}
