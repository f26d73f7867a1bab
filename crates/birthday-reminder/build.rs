use vergen_gitcl::{BuildBuilder, CargoBuilder, Emitter, GitclBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let build = BuildBuilder::default().build_date(true).build()?;
    let cargo = CargoBuilder::default().target_triple(true).build()?;
    let gitcl = GitclBuilder::default().sha(true).build()?;

    let emitted = Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&cargo)?
        .add_instructions(&gitcl)?
        .emit();

    if emitted.is_err() {
        emit_fallback();
    }

    Ok(())
}

/// git が使えない環境向けの値を出力する。
///
/// CI では GITHUB_SHA から短縮ハッシュを取る。
fn emit_fallback() {
    let sha = std::env::var("GITHUB_SHA")
        .map(|sha| sha.chars().take(7).collect::<String>())
        .unwrap_or_else(|_| "unknown".to_string());

    let values = [
        ("VERGEN_BUILD_DATE", "unknown".to_string()),
        ("VERGEN_CARGO_TARGET_TRIPLE", "unknown".to_string()),
        ("VERGEN_GIT_SHA", sha),
    ];
    for (key, value) in values {
        println!("cargo::rustc-env={key}={value}");
    }
}
