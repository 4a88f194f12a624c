use std::fs;
use std::path::{Path, PathBuf};

use fg_core::error::Error;
use fg_core::module::MapLocator;
use fg_core::random::{RandomSource, RngSource, ScriptedSource};
use fg_fixture::{generate, FieldFailurePolicy, SynthesisOptions};
use fg_golang::{GoFrontend, GoParser};
use pretty_assertions::assert_eq;
use regex::Regex;
use tempfile::TempDir;

fn write_package(root: &Path, name: &str, files: &[(&str, &str)]) -> PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    for (file, source) in files {
        fs::write(dir.join(file), source).unwrap();
    }
    dir
}

fn run(dir: &Path, name: &str, locator: &MapLocator, rng: &mut dyn RandomSource) -> String {
    generate(dir, name, &GoFrontend, locator, rng, SynthesisOptions::default()).unwrap()
}

fn run_scripted(dir: &Path, name: &str, script: &[u64]) -> String {
    let mut rng = ScriptedSource::new(script.iter().copied());
    run(dir, name, &MapLocator::new(), &mut rng)
}

/// Embeds a fixture in a Go file and checks that it parses cleanly.
fn assert_valid_go(fixture: &str) {
    let mut parser = GoParser::new().unwrap();
    let source = format!("package fixture\n\nvar _ = {fixture}\n");
    if let Err(err) = parser.parse_str(&source) {
        panic!("fixture is not valid Go ({err}):\n{fixture}");
    }
}

#[test]
fn point_fixture_has_bounded_ints() {
    let tmp = TempDir::new().unwrap();
    let dir = write_package(
        tmp.path(),
        "app",
        &[("point.go", "package app\n\ntype Point struct {\n\tX int\n\tY int\n}\n")],
    );
    let shape = Regex::new(r"^Point\{\n\tX: (\d+),\n\tY: (\d+),\n\}$").unwrap();

    for seed in 0..20 {
        let fixture = run(&dir, "Point", &MapLocator::new(), &mut RngSource::seeded(seed));
        let captures = shape
            .captures(&fixture)
            .unwrap_or_else(|| panic!("unexpected shape:\n{fixture}"));
        for idx in 1..=2 {
            let value: u64 = captures[idx].parse().unwrap();
            assert!(value < 1_000_000);
        }
    }
}

#[test]
fn string_slice_has_one_to_three_entries() {
    let tmp = TempDir::new().unwrap();
    let dir = write_package(
        tmp.path(),
        "app",
        &[("box.go", "package app\n\ntype Box struct {\n\tItems []string\n}\n")],
    );
    let shape =
        Regex::new(r#"^Box\{\n\tItems: \[\]string\{"[a-zA-Z]{0,19}"(, "[a-zA-Z]{0,19}"){0,2}\},\n\}$"#)
            .unwrap();

    for seed in 0..20 {
        let fixture = run(&dir, "Box", &MapLocator::new(), &mut RngSource::seeded(seed));
        assert!(shape.is_match(&fixture), "unexpected shape:\n{fixture}");
    }
}

#[test]
fn unsupported_field_is_omitted() {
    let tmp = TempDir::new().unwrap();
    let dir = write_package(
        tmp.path(),
        "app",
        &[(
            "handler.go",
            "package app\n\ntype Handler struct {\n\tName string\n\tFn func()\n\tEvents chan int\n\tCount int\n}\n",
        )],
    );
    let shape = Regex::new(r#"^Handler\{\n\tName: "[a-zA-Z]*",\n\tCount: \d+,\n\}$"#).unwrap();

    let fixture = run(&dir, "Handler", &MapLocator::new(), &mut RngSource::seeded(3));
    assert!(shape.is_match(&fixture), "unexpected shape:\n{fixture}");
}

#[test]
fn map_entries_are_one_per_line() {
    let tmp = TempDir::new().unwrap();
    let dir = write_package(
        tmp.path(),
        "app",
        &[("doc.go", "package app\n\ntype Doc struct {\n\tTags map[string]int\n}\n")],
    );

    // count 2, key "a", value 9, key "", value 4
    let fixture = run_scripted(&dir, "Doc", &[2, 1, 0, 9, 0, 4]);
    assert_eq!(
        fixture,
        "Doc{\n\tTags: map[string]int{\n\t\t\"a\": 9,\n\t\t\"\": 4},\n}"
    );

    let entry = Regex::new(r#"(?m)^\t\t"[a-zA-Z]*": \d+"#).unwrap();
    for seed in 0..20 {
        let fixture = run(&dir, "Doc", &MapLocator::new(), &mut RngSource::seeded(seed));
        let entries = entry.find_iter(&fixture).count();
        assert!((1..=3).contains(&entries), "{entries} entries in:\n{fixture}");
    }
}

#[test]
fn duplicate_map_keys_are_kept() {
    let tmp = TempDir::new().unwrap();
    let dir = write_package(
        tmp.path(),
        "app",
        &[("doc.go", "package app\n\ntype Doc struct {\n\tTags map[string]int\n}\n")],
    );

    let fixture = run_scripted(&dir, "Doc", &[2, 0, 1, 0, 2]);
    assert_eq!(
        fixture,
        "Doc{\n\tTags: map[string]int{\n\t\t\"\": 1,\n\t\t\"\": 2},\n}"
    );
}

#[test]
fn nested_records_and_pointers() {
    let tmp = TempDir::new().unwrap();
    let dir = write_package(
        tmp.path(),
        "app",
        &[
            ("line.go", "package app\n\ntype Line struct {\n\tFrom Point\n\tTo   *Point\n}\n"),
            ("point.go", "package app\n\ntype Point struct {\n\tX int\n}\n"),
        ],
    );

    let fixture = run_scripted(&dir, "Line", &[1, 2]);
    assert_eq!(
        fixture,
        "Line{\n\tFrom: Point{\n\t\tX: 1,\n\t},\n\tTo: &Point{\n\t\tX: 2,\n\t},\n}"
    );
}

#[test]
fn pointer_elements_take_address() {
    let tmp = TempDir::new().unwrap();
    let dir = write_package(
        tmp.path(),
        "app",
        &[(
            "path.go",
            "package app\n\ntype Point struct {\n\tX int\n}\n\ntype Path struct {\n\tPoints []*Point\n}\n",
        )],
    );

    let fixture = run_scripted(&dir, "Path", &[2, 5, 6]);
    assert_eq!(
        fixture,
        "Path{\n\tPoints: []*Point{&Point{\n\t\tX: 5,\n\t}, &Point{\n\t\tX: 6,\n\t}},\n}"
    );
}

#[test]
fn fixed_arrays_respect_their_length() {
    let tmp = TempDir::new().unwrap();
    let dir = write_package(
        tmp.path(),
        "app",
        &[(
            "fixed.go",
            "package app\n\nconst N = 4\n\ntype Fixed struct {\n\tGrid  [2]int\n\tEmpty [0]int\n\tSized [N]int\n}\n",
        )],
    );

    let fixture = run_scripted(&dir, "Fixed", &[3, 7, 8, 1, 2, 6]);
    assert_eq!(
        fixture,
        "Fixed{\n\tGrid: [2]int{7, 8},\n\tEmpty: [0]int{},\n\tSized: [N]int{6},\n}"
    );
}

#[test]
fn declared_types_resolve_locally() {
    let tmp = TempDir::new().unwrap();
    let dir = write_package(
        tmp.path(),
        "app",
        &[(
            "account.go",
            r#"package app

type (
	Status int
	Label  = string
	IDs    []string
)

type User struct {
	Name string
}

type Admin User

type Account struct {
	State Status
	Tag   Label
	Refs  IDs
	Owner Admin
}
"#,
        )],
    );

    let fixture = run_scripted(&dir, "Account", &[5, 2, 1, 27, 1, 0, 1, 3]);
    assert_eq!(
        fixture,
        "Account{\n\tState: Status(5),\n\tTag: \"bB\",\n\tRefs: []string{\"\"},\n\tOwner: Admin{\n\t\tName: \"d\",\n\t},\n}"
    );
}

#[test]
fn self_referential_record_terminates() {
    let tmp = TempDir::new().unwrap();
    let dir = write_package(
        tmp.path(),
        "app",
        &[("node.go", "package app\n\ntype Node struct {\n\tValue int\n\tNext  *Node\n}\n")],
    );

    let fixture = run(&dir, "Node", &MapLocator::new(), &mut RngSource::seeded(9));
    assert!(fixture.starts_with("Node{\n"));
    assert_eq!(fixture.matches("&Node{").count(), 4);
    assert_eq!(fixture.matches("Value:").count(), 5);
    assert_valid_go(&fixture);
}

#[test]
fn external_records_use_their_own_package() {
    let tmp = TempDir::new().unwrap();
    let app = write_package(
        tmp.path(),
        "app",
        &[(
            "route.go",
            r#"package app

import (
	"example.com/geo"
	"example.com/missing"
)

type Route struct {
	Name  string
	Start geo.Point
	Stops []*geo.Point
	Gone  missing.Thing
	Other nope.Thing
}
"#,
        )],
    );
    let geo = write_package(
        tmp.path(),
        "geo",
        &[(
            "point.go",
            r#"package geo

import "time"

type Point struct {
	X    int
	Meta Info
	When time.Time
}

type Info struct {
	Label string
}
"#,
        )],
    );
    let locator = MapLocator::new()
        .with("example.com/geo", geo)
        .with("example.com/missing", tmp.path().join("missing"));

    for seed in 0..10 {
        let fixture = run(&app, "Route", &locator, &mut RngSource::seeded(seed));
        assert!(fixture.starts_with("Route{\n\tName: \""), "{fixture}");
        assert!(fixture.contains("\tStart: Point{\n\t\tX: "), "{fixture}");
        assert!(fixture.contains("\t\tMeta: Info{\n\t\t\tLabel: \""), "{fixture}");
        assert!(fixture.contains("\tStops: []*geo.Point{&Point{"), "{fixture}");
        for skipped in ["When", "Gone", "Other"] {
            let field = format!("\t{skipped}:");
            assert!(!fixture.contains(&field), "{skipped} leaked into:\n{fixture}");
        }
        assert_valid_go(&fixture);
    }
}

#[test]
fn fixtures_parse_as_go() {
    let tmp = TempDir::new().unwrap();
    let dir = write_package(
        tmp.path(),
        "app",
        &[(
            "kitchen.go",
            r#"package app

type Inner struct {
	Flag  bool
	Ratio float64
}

type Kitchen struct {
	A int8
	B int16
	C int32
	D int64
	E uint
	F uint8
	G uint16
	H uint32
	I uint64
	J float32
	K string
	L []Inner
	M map[string][]*Inner
	N [3]bool
	O *Inner
	P map[int]string
}
"#,
        )],
    );

    for seed in 0..50 {
        let fixture = run(&dir, "Kitchen", &MapLocator::new(), &mut RngSource::seeded(seed));
        assert!(fixture.contains("\tA: int8("), "{fixture}");
        assert!(fixture.contains("\tO: &Inner{"), "{fixture}");
        assert_valid_go(&fixture);
    }
}

#[test]
fn missing_record_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let dir = write_package(
        tmp.path(),
        "app",
        &[("point.go", "package app\n\ntype Point struct {\n\tX int\n}\n\ntype Status int\n")],
    );

    for name in ["Missing", "Status"] {
        let err = generate(
            &dir,
            name,
            &GoFrontend,
            &MapLocator::new(),
            &mut ScriptedSource::default(),
            SynthesisOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }), "{name}: {err}");
    }
}

#[test]
fn abort_policy_fails_whole_fixture() {
    let tmp = TempDir::new().unwrap();
    let dir = write_package(
        tmp.path(),
        "app",
        &[(
            "handler.go",
            "package app\n\ntype Handler struct {\n\tName string\n\tFn func()\n}\n",
        )],
    );
    let options = SynthesisOptions {
        field_failure: FieldFailurePolicy::Abort,
        ..SynthesisOptions::default()
    };

    let err = generate(
        &dir,
        "Handler",
        &GoFrontend,
        &MapLocator::new(),
        &mut RngSource::seeded(1),
        options,
    )
    .unwrap_err();
    assert!(matches!(err, Error::UnsupportedType(_)), "{err}");
}

#[test]
fn defined_type_over_external_record_keeps_its_name() {
    let tmp = TempDir::new().unwrap();
    let app = write_package(
        tmp.path(),
        "app",
        &[(
            "trip.go",
            r#"package app

import "example.com/geo"

type Loc geo.Point

type Trip struct {
	At   Loc
	Back *Loc
}
"#,
        )],
    );
    let geo = write_package(
        tmp.path(),
        "geo",
        &[("point.go", "package geo\n\ntype Point struct {\n\tX int\n}\n")],
    );
    let locator = MapLocator::new().with("example.com/geo", geo);

    let fixture = run(&app, "Trip", &locator, &mut ScriptedSource::new([4, 5]));
    assert_eq!(
        fixture,
        "Trip{\n\tAt: Loc{\n\t\tX: 4,\n\t},\n\tBack: &Loc{\n\t\tX: 5,\n\t},\n}"
    );
    assert_valid_go(&fixture);
}

#[test]
fn cyclic_defined_types_are_skipped() {
    let tmp = TempDir::new().unwrap();
    let dir = write_package(
        tmp.path(),
        "app",
        &[(
            "cycle.go",
            r#"package app

type A B

type B A

type L []L

type Cyclic struct {
	Name  string
	Loop  A
	List  L
	Count int
}
"#,
        )],
    );
    let shape = Regex::new(r#"^Cyclic\{\n\tName: "[a-zA-Z]*",\n\tCount: \d+,\n\}$"#).unwrap();

    for seed in 0..5 {
        let fixture = run(&dir, "Cyclic", &MapLocator::new(), &mut RngSource::seeded(seed));
        assert!(shape.is_match(&fixture), "unexpected shape:\n{fixture}");
    }

    let options = SynthesisOptions {
        field_failure: FieldFailurePolicy::Abort,
        ..SynthesisOptions::default()
    };
    let err = generate(
        &dir,
        "Cyclic",
        &GoFrontend,
        &MapLocator::new(),
        &mut RngSource::seeded(1),
        options,
    )
    .unwrap_err();
    assert!(matches!(err, Error::RecursionLimit { depth: 5 }), "{err}");
}
