#![allow(dead_code)]
use assert_fs::{TempDir, prelude::*};

/// Builds the fixture tree:
/// root/
///   file1.py            print("x")
///   file2.c             int main(){}
///   notes.txt           (unsupported extension)
///   skipme/ignored.py   bad
///   skipme/deeper/also_ignored.c
///   sub/dir/mod.py
///   sub/skipme/nested_ignored.py
pub fn basic_fs() -> TempDir {
    let td = TempDir::new().unwrap();
    td.child("file1.py").write_str("print(\"x\")").unwrap();
    td.child("file2.c").write_str("int main(){}").unwrap();
    td.child("notes.txt").write_str("not source").unwrap();
    td.child("skipme/ignored.py").write_str("bad").unwrap();
    td.child("skipme/deeper/also_ignored.c")
        .write_str("bad")
        .unwrap();
    td.child("sub/dir/mod.py").write_str("import os\n").unwrap();
    td.child("sub/skipme/nested_ignored.py")
        .write_str("bad")
        .unwrap();
    td
}

/// Root with only the two top-level source files.
pub fn flat_fs() -> TempDir {
    let td = TempDir::new().unwrap();
    td.child("file1.py").write_str("print(\"x\")").unwrap();
    td.child("file2.c").write_str("int main(){}").unwrap();
    td.child("skipme/ignored.py").write_str("bad").unwrap();
    td
}
