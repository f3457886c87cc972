//! End-to-end tests for the `jakt` binary.

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const HELLO: &str = "function main() {\n    println(\"Hello, world!\")\n}\n";
const BROKEN: &str = "function main() {\n    missing()\n}\n";

fn jakt(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("jakt").unwrap();
    cmd.current_dir(dir).env_remove("JAKT_LOG");
    cmd
}

fn project(source: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("foo.jakt"), source).unwrap();
    temp
}

#[test]
fn test_no_arguments_prints_usage() {
    let temp = TempDir::new().unwrap();

    jakt(temp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage:"));

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_help() {
    let temp = project(HELLO);

    for flag in ["-h", "--help"] {
        jakt(temp.path())
            .args([flag, "-b", "foo.jakt", "bar.jakt"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage: jakt [OPTIONS] <FILE>"))
            .stdout(predicate::str::contains("--cxx-compiler-path"));
    }
    assert!(!temp.path().join("build").exists());
}

#[test]
fn test_version() {
    let temp = project(HELLO);

    for flag in ["-v", "--version"] {
        jakt(temp.path())
            .args([flag, "foo.jakt"])
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

#[test]
fn test_two_source_files() {
    let temp = project(HELLO);
    fs::write(temp.path().join("bar.jakt"), HELLO).unwrap();

    jakt(temp.path())
        .args(["foo.jakt", "bar.jakt"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("only one source file"))
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_missing_option_value_prints_usage() {
    let temp = project(HELLO);

    jakt(temp.path())
        .args(["-o", "-h", "foo.jakt"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--binary-dir"))
        .stderr(predicate::str::contains("Usage: jakt [OPTIONS] <FILE>"));
}

#[test]
fn test_wrong_extension() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("foo.txt"), HELLO).unwrap();

    jakt(temp.path())
        .args(["-b", "foo.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "the compiler expects files with file extension .jakt",
        ));

    assert!(!temp.path().join("build").exists());
}

#[test]
fn test_unreadable_input() {
    let temp = TempDir::new().unwrap();

    jakt(temp.path())
        .arg("missing.jakt")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.jakt"));
}

#[test]
fn test_emit_prints_cpp_and_writes_nothing() {
    let temp = project(HELLO);

    jakt(temp.path())
        .arg("foo.jakt")
        .assert()
        .success()
        .stdout(predicate::str::contains("namespace Jakt {"))
        .stdout(predicate::str::contains("Hello, world!"))
        .stdout(predicate::str::contains("int main()"));

    assert!(!temp.path().join("build").exists());
}

#[test]
fn test_debug_info_adds_line_directives() {
    let temp = project(HELLO);

    jakt(temp.path())
        .args(["-d", "foo.jakt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#line 2"));
}

#[test]
fn test_diagnostics_fail_before_codegen() {
    let temp = project(BROKEN);

    jakt(temp.path())
        .args(["-b", "foo.jakt"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unknown function 'missing'"));

    assert!(!temp.path().join("build").exists());
}

#[test]
fn test_debug_flags_only_add_output() {
    for source in [HELLO, BROKEN] {
        let temp = project(source);

        let plain = jakt(temp.path()).arg("foo.jakt").output().unwrap();
        let debug = jakt(temp.path())
            .args(["-l", "-p", "-t", "--debug-print", "foo.jakt"])
            .output()
            .unwrap();

        assert_eq!(plain.status.code(), debug.status.code());
        assert_eq!(plain.stdout, debug.stdout);
        assert!(debug.stderr.len() > plain.stderr.len());
        assert!(String::from_utf8_lossy(&debug.stderr).contains("[lex] done"));
        assert!(!temp.path().join("build").exists());
    }
}

#[test]
fn test_build_with_missing_compiler() {
    let temp = project(HELLO);

    jakt(temp.path())
        .args(["-b", "-C", "/nonexistent/clang++", "foo.jakt"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to launch C++ compiler"));

    let cpp = fs::read_to_string(temp.path().join("build/foo.cpp")).unwrap();
    assert!(cpp.contains("Hello, world!"));
    assert!(!temp.path().join("build/foo").exists());
}

/// Write an executable shell script named `name` into `dir`.
#[cfg(unix)]
fn stand_in(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A compiler that logs `cxx <args>` to `tools.log` and writes a script to
/// the `-o` path which prints a line and exits 7.
#[cfg(unix)]
fn fake_compiler(dir: &Path) -> std::path::PathBuf {
    stand_in(
        dir,
        "fake-cxx",
        r#"echo "cxx $@" >> "$(dirname "$0")/tools.log"
out=""
while [ $# -gt 0 ]; do
    if [ "$1" = "-o" ]; then
        out="$2"
        shift
    fi
    shift
done
printf '#!/bin/sh\necho from-binary\nexit 7\n' > "$out"
chmod +x "$out"
"#,
    )
}

/// A formatter that logs `fmt <args>` to `tools.log`.
#[cfg(unix)]
fn fake_formatter(dir: &Path) -> std::path::PathBuf {
    stand_in(
        dir,
        "fake-fmt",
        "echo \"fmt $@\" >> \"$(dirname \"$0\")/tools.log\"\n",
    )
}

#[cfg(unix)]
fn tool_log(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("tools.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_owned)
        .collect()
}

#[cfg(unix)]
#[test]
fn test_build_and_run_with_fake_compiler() {
    let temp = project(HELLO);
    let compiler = fake_compiler(temp.path());

    jakt(temp.path())
        .arg("-b")
        .arg("-C")
        .arg(&compiler)
        .args(["-o", "out", "foo.jakt"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(temp.path().join("out/foo.cpp").exists());
    assert!(temp.path().join("out/foo").exists());
    let log = tool_log(temp.path());
    assert_eq!(log.len(), 1);
    assert!(log[0].starts_with("cxx -fcolor-diagnostics -std=c++20"));
    assert!(log[0].ends_with("-I runtime -o out/foo out/foo.cpp"));

    jakt(temp.path())
        .arg("-r")
        .arg("-C")
        .arg(&compiler)
        .args(["-o", "out", "foo.jakt"])
        .assert()
        .code(7)
        .stdout(predicate::str::contains("from-binary"));
}

#[cfg(unix)]
#[test]
fn test_prettify_formats_after_compiling() {
    let temp = project(HELLO);
    let compiler = fake_compiler(temp.path());
    let formatter = fake_formatter(temp.path());

    jakt(temp.path())
        .arg("-b")
        .arg("--prettify-cpp-source")
        .arg("-C")
        .arg(&compiler)
        .arg("-F")
        .arg(&formatter)
        .args(["-D", "s/.clang-format", "foo.jakt"])
        .assert()
        .success();

    let log = tool_log(temp.path());
    assert_eq!(log.len(), 2);
    assert!(log[0].starts_with("cxx "));
    assert!(log[0].ends_with("-o build/foo build/foo.cpp"));
    assert_eq!(log[1], "fmt -i build/foo.cpp --style=file:s/.clang-format");
}

#[cfg(unix)]
#[test]
fn test_formatter_only_runs_when_requested() {
    let temp = project(HELLO);
    let compiler = fake_compiler(temp.path());
    let formatter = fake_formatter(temp.path());

    jakt(temp.path())
        .arg("-b")
        .arg("-C")
        .arg(&compiler)
        .arg("-F")
        .arg(&formatter)
        .arg("foo.jakt")
        .assert()
        .success();

    let log = tool_log(temp.path());
    assert_eq!(log.len(), 1);
    assert!(log[0].starts_with("cxx "));
}

#[cfg(unix)]
#[test]
fn test_formatter_skipped_when_compile_fails() {
    let temp = project(HELLO);
    let formatter = fake_formatter(temp.path());

    jakt(temp.path())
        .args(["-b", "--prettify-cpp-source", "-C", "/bin/false", "-F"])
        .arg(&formatter)
        .arg("foo.jakt")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("C++ compiler exited with"));

    assert!(tool_log(temp.path()).is_empty());
}

#[cfg(unix)]
#[test]
fn test_formatter_failure_exits_one() {
    let temp = project(HELLO);
    let compiler = fake_compiler(temp.path());

    jakt(temp.path())
        .arg("-b")
        .arg("--prettify-cpp-source")
        .arg("-C")
        .arg(&compiler)
        .args(["-F", "/bin/false", "foo.jakt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("clang-format exited with"));

    assert_eq!(tool_log(temp.path()).len(), 1);
    assert!(temp.path().join("build/foo.cpp").exists());
}
