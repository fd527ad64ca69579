//! Black-box CLI tests. These stick to `-S`/`--emit-ast` and
//! error-path scenarios so they never need a working `cc`/`gcc` on the
//! test machine's `PATH`.

use std::fs;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

fn ramseyc() -> Command {
    Command::cargo_bin("ramseyc").expect("ramseyc binary builds")
}

fn write_ram(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn empty_function_emits_asm_with_no_subl_and_one_movl_zero_eax() {
    let dir = tempdir().unwrap();
    let ram = write_ram(dir.path(), "main.ram", "fun main() as in\ntoss 0\nendfun\n");
    let driver = write_ram(dir.path(), "driver.c", "int main(void) { return 0; }\n");

    ramseyc().arg(&ram).arg(&driver).arg("-S").current_dir(dir.path()).assert().success();

    let asm = fs::read_to_string(dir.path().join("main.s")).unwrap();
    assert!(!asm.contains("subl"));
    assert_eq!(asm.matches("movl $0, %eax").count(), 1);
}

#[test]
fn integer_arithmetic_respects_precedence() {
    let dir = tempdir().unwrap();
    let ram = write_ram(dir.path(), "f.ram", "fun f() as in\nin x <- 1 + 2 * 3\ntoss x\nendfun\n");
    let driver = write_ram(dir.path(), "driver.c", "int main(void) { return 0; }\n");

    ramseyc().arg(&ram).arg(&driver).arg("-S").current_dir(dir.path()).assert().success();

    let asm = fs::read_to_string(dir.path().join("f.s")).unwrap();
    let mul_pos = asm.find("imull").expect("multiplication happens first");
    let add_pos = asm.find("addl").expect("addition folds the product in");
    assert!(mul_pos < add_pos);
}

#[test]
fn non_boolean_if_condition_is_a_semantic_error() {
    let dir = tempdir().unwrap();
    let ram = write_ram(dir.path(), "h.ram", "fun h() as in\nif (3+4)\ntoss 1\nendif\ntoss 0\nendfun\n");
    let driver = write_ram(dir.path(), "driver.c", "int main(void) { return 0; }\n");

    ramseyc()
        .arg(&ram)
        .arg(&driver)
        .arg("-S")
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(contains("semantic error"))
        .stderr(contains("if-statement condition"));
}

#[test]
fn short_circuit_or_branches_to_a_common_true_label() {
    let dir = tempdir().unwrap();
    let ram = write_ram(
        dir.path(),
        "k.ram",
        "fun k(boo a, boo b, boo c) as boo\ntoss a or b or c\nendfun\n",
    );
    let driver = write_ram(dir.path(), "driver.c", "int main(void) { return 0; }\n");

    ramseyc().arg(&ram).arg(&driver).arg("-S").current_dir(dir.path()).assert().success();

    let asm = fs::read_to_string(dir.path().join("k.s")).unwrap();
    assert!(asm.matches("jne").count() >= 2);
    assert!(asm.matches("je L").count() >= 1);
}

#[test]
fn redeclared_function_is_a_semantic_error() {
    let dir = tempdir().unwrap();
    let ram = write_ram(dir.path(), "dup.ram", "fun f()\nendfun\nfun f()\nendfun\n");
    let driver = write_ram(dir.path(), "driver.c", "int main(void) { return 0; }\n");

    ramseyc()
        .arg(&ram)
        .arg(&driver)
        .arg("-S")
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(contains("semantic error"));
}

#[test]
fn missing_ram_file_is_an_invalid_arguments_error() {
    let dir = tempdir().unwrap();
    let driver = write_ram(dir.path(), "driver.c", "int main(void) { return 0; }\n");

    ramseyc().arg(&driver).current_dir(dir.path()).assert().failure().stderr(contains("error"));
}

#[test]
fn emit_ast_dumps_the_parsed_program_and_stops() {
    let dir = tempdir().unwrap();
    let ram = write_ram(dir.path(), "main.ram", "fun main() as in\ntoss 0\nendfun\n");
    let driver = write_ram(dir.path(), "driver.c", "int main(void) { return 0; }\n");

    ramseyc()
        .arg(&ram)
        .arg(&driver)
        .arg("--emit-ast")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(contains("Function"));

    assert!(!dir.path().join("main.s").exists());
}
