use std::fs;

use assert_matches::assert_matches;
use sheet_qr::encoder::{CodeEncoder, QrEncoder, encode_png};
use sheet_qr::model::SkipReason;
use sheet_qr::{ErrorKind, ProcessError, SeenNames, process};

mod support;

fn expected_png(data: &str) -> Vec<u8> {
    let image = QrEncoder::default().render(data).expect("render");
    encode_png(&image).expect("png")
}

#[test]
fn embeds_code_for_rows_with_data_only() {
    let workspace = support::TestWorkspace::new();
    let source = workspace.create_rows(
        "accounts.xlsx",
        &[("alice", "https://a.example"), ("bob", "")],
    );
    let output = workspace.path("codes");

    let mut seen = SeenNames::new();
    let summary = process(&source, &output, &mut seen).expect("process");

    assert_eq!(support::png_files(&output), vec!["alice.png".to_string()]);
    assert_eq!(summary.rows_scanned, 2);
    assert_eq!(summary.embeds.len(), 1);
    assert_eq!(summary.embeds[0].anchor, "C2");
    assert_eq!(summary.skipped_count(SkipReason::EmptyData), 1);

    let book = support::read_workbook(&source);
    assert_eq!(support::cell_value(&book, "A2"), "alice");
    assert_eq!(support::cell_value(&book, "B2"), "https://a.example");
    assert_eq!(support::cell_value(&book, "A3"), "bob");
    assert_eq!(support::cell_value(&book, "B3"), "");
    assert_eq!(support::image_anchors(&book), vec!["C2".to_string()]);
}

#[test]
fn duplicate_name_keeps_first_data() {
    let workspace = support::TestWorkspace::new();
    let source = workspace.create_rows("dupes.xlsx", &[("alice", "X"), ("alice", "Y")]);
    let output = workspace.path("codes");

    let mut seen = SeenNames::new();
    let summary = process(&source, &output, &mut seen).expect("process");

    assert_eq!(support::png_files(&output), vec!["alice.png".to_string()]);
    let written = fs::read(output.join("alice.png")).expect("read artifact");
    assert_eq!(written, expected_png("X"));
    assert_ne!(written, expected_png("Y"));

    assert_eq!(summary.embeds.len(), 1);
    assert_eq!(summary.embeds[0].row, 2);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].row, 3);
    assert_eq!(summary.skipped[0].reason, SkipReason::DuplicateName);

    let book = support::read_workbook(&source);
    assert_eq!(support::image_anchors(&book), vec!["C2".to_string()]);
}

#[test]
fn creates_missing_output_folder() {
    let workspace = support::TestWorkspace::new();
    let source = workspace.create_rows("book.xlsx", &[("carol", "C")]);
    let output = workspace.path("nested/deeper/codes");
    assert!(!output.exists());

    let mut seen = SeenNames::new();
    process(&source, &output, &mut seen).expect("process");

    assert!(output.is_dir());
    assert!(output.join("carol.png").is_file());
}

#[test]
fn missing_source_fails_before_touching_output() {
    let workspace = support::TestWorkspace::new();
    let source = workspace.path("absent.xlsx");
    let output = workspace.path("codes");

    let mut seen = SeenNames::new();
    let err = process(&source, &output, &mut seen).expect_err("missing source");

    assert_eq!(err.kind(), ErrorKind::Load);
    assert_matches!(err, ProcessError::SourceMissing { .. });
    assert!(!output.exists());
}

#[test]
fn unparsable_source_is_a_load_error() {
    let workspace = support::TestWorkspace::new();
    let source = workspace.path("garbage.xlsx");
    fs::write(&source, b"definitely not a zip archive").expect("write");
    let output = workspace.path("codes");

    let mut seen = SeenNames::new();
    let err = process(&source, &output, &mut seen).expect_err("garbage source");

    assert_matches!(err, ProcessError::Load { .. });
    assert!(!output.exists());
}

#[test]
fn every_name_gets_exactly_one_artifact() {
    let workspace = support::TestWorkspace::new();
    let source = workspace.create_rows(
        "many.xlsx",
        &[
            ("a", "1"),
            ("b", "2"),
            ("a", "3"),
            ("c", ""),
            ("b", "4"),
            ("d", "5"),
            ("c", "6"),
        ],
    );
    let output = workspace.path("codes");

    let mut seen = SeenNames::new();
    let summary = process(&source, &output, &mut seen).expect("process");

    assert_eq!(
        support::png_files(&output),
        vec!["a.png", "b.png", "c.png", "d.png"]
    );
    // c's first row has no data, so its artifact comes from row 8
    assert_eq!(fs::read(output.join("c.png")).expect("read"), expected_png("6"));
    assert_eq!(summary.embeds.len(), 4);
    assert_eq!(summary.skipped_count(SkipReason::DuplicateName), 2);
    assert_eq!(summary.skipped_count(SkipReason::EmptyData), 1);
    assert_eq!(seen.len(), 4);
}

#[test]
fn embedded_size_preserves_aspect_ratio() {
    let workspace = support::TestWorkspace::new();
    let source = workspace.create_rows(
        "ratio.xlsx",
        &[("alice", "https://a.example/with/a/longer/path")],
    );
    let output = workspace.path("codes");

    let mut seen = SeenNames::new();
    let summary = process(&source, &output, &mut seen).expect("process");

    let embed = &summary.embeds[0];
    let original = f64::from(embed.artifact_width) / f64::from(embed.artifact_height);
    let placed = f64::from(embed.width_px) / f64::from(embed.height_px);
    assert!((original - placed).abs() <= 1.0 / f64::from(embed.height_px));
}

#[test]
fn placement_follows_row_height() {
    let workspace = support::TestWorkspace::new();
    let source = workspace.create_workbook("tall.xlsx", |book| {
        support::fill_rows(book, &[("alice", "X")]);
        let sheet = book.get_sheet_by_name_mut("Sheet1").expect("Sheet1");
        let row = sheet.get_row_dimension_mut(&2);
        row.set_height(60.0);
        row.set_custom_height(true);
    });
    let output = workspace.path("codes");

    let mut seen = SeenNames::new();
    let summary = process(&source, &output, &mut seen).expect("process");

    assert_eq!(summary.embeds[0].height_px, 60);
    assert_eq!(summary.embeds[0].width_px, 60);
}

#[test]
fn reruns_produce_identical_artifacts() {
    let workspace = support::TestWorkspace::new();
    let rows = [("alice", "X"), ("bob", "https://b.example"), ("alice", "Z")];
    let first_source = workspace.create_rows("first.xlsx", &rows);
    let second_source = workspace.create_rows("second.xlsx", &rows);
    let first_out = workspace.path("first-codes");
    let second_out = workspace.path("second-codes");

    process(&first_source, &first_out, &mut SeenNames::new()).expect("first run");
    process(&second_source, &second_out, &mut SeenNames::new()).expect("second run");

    let first_files = support::png_files(&first_out);
    assert_eq!(first_files, support::png_files(&second_out));
    for file in first_files {
        assert_eq!(
            fs::read(first_out.join(&file)).expect("read"),
            fs::read(second_out.join(&file)).expect("read"),
            "artifact {file} differs between runs"
        );
    }
}

#[test]
fn shared_seen_set_dedups_across_files() {
    let workspace = support::TestWorkspace::new();
    let first = workspace.create_rows("one.xlsx", &[("alice", "X")]);
    let second = workspace.create_rows("two.xlsx", &[("alice", "Y"), ("bob", "B")]);
    let output = workspace.path("codes");

    let mut seen = SeenNames::new();
    process(&first, &output, &mut seen).expect("first file");
    let summary = process(&second, &output, &mut seen).expect("second file");

    assert_eq!(summary.embeds.len(), 1);
    assert_eq!(summary.embeds[0].name, "bob");
    assert_eq!(fs::read(output.join("alice.png")).expect("read"), expected_png("X"));
}

#[test]
fn unnamed_row_with_data_still_gets_a_code() {
    let workspace = support::TestWorkspace::new();
    let source = workspace.create_rows(
        "unnamed.xlsx",
        &[("", "orphan"), ("dave", "D"), ("", "second orphan")],
    );
    let output = workspace.path("codes");

    let summary = process(&source, &output, &mut SeenNames::new()).expect("process");

    assert_eq!(
        support::png_files(&output),
        vec!["%.png".to_string(), "dave.png".to_string()]
    );
    assert_eq!(fs::read(output.join("%.png")).expect("read"), expected_png("orphan"));
    assert_eq!(summary.embeds.len(), 2);
    assert_eq!(summary.embeds[0].anchor, "C2");
    assert_eq!(summary.embeds[1].anchor, "C3");
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].row, 4);
    assert_eq!(summary.skipped[0].reason, SkipReason::DuplicateName);
}

#[test]
fn whitespace_only_data_is_encoded() {
    let workspace = support::TestWorkspace::new();
    let source = workspace.create_rows("spaces.xlsx", &[("alice", "   ")]);
    let output = workspace.path("codes");

    let summary = process(&source, &output, &mut SeenNames::new()).expect("process");

    assert_eq!(support::png_files(&output), vec!["alice.png".to_string()]);
    assert_eq!(fs::read(output.join("alice.png")).expect("read"), expected_png("   "));
    assert_eq!(summary.embeds.len(), 1);
    assert!(summary.skipped.is_empty());
}

#[test]
fn names_differing_only_by_separator_keep_their_own_data() {
    let workspace = support::TestWorkspace::new();
    let source = workspace.create_rows("separators.xlsx", &[("a/b", "X"), ("a_b", "Y")]);
    let output = workspace.path("codes");

    let mut seen = SeenNames::new();
    let summary = process(&source, &output, &mut seen).expect("process");

    assert_eq!(
        support::png_files(&output),
        vec!["a%2Fb.png".to_string(), "a_b.png".to_string()]
    );
    assert_eq!(fs::read(output.join("a%2Fb.png")).expect("read"), expected_png("X"));
    assert_eq!(fs::read(output.join("a_b.png")).expect("read"), expected_png("Y"));
    assert_eq!(summary.embeds.len(), 2);
    assert!(summary.skipped.is_empty());
    assert!(seen.contains("a/b") && seen.contains("a_b"));

    let book = support::read_workbook(&source);
    assert_eq!(
        support::image_anchors(&book),
        vec!["C2".to_string(), "C3".to_string()]
    );
}

#[test]
fn directory_source_is_a_load_error() {
    let workspace = support::TestWorkspace::new();
    let source = workspace.path("folder.xlsx");
    fs::create_dir_all(&source).expect("mkdir");
    let output = workspace.path("codes");

    let err = process(&source, &output, &mut SeenNames::new()).expect_err("directory source");

    assert_matches!(err, ProcessError::Load { .. });
    assert!(!output.exists());
}

#[test]
fn failed_run_leaves_source_unsaved() {
    let workspace = support::TestWorkspace::new();
    let oversized = "x".repeat(8000);
    let source = workspace.create_rows(
        "partial.xlsx",
        &[("alice", "X"), ("huge", oversized.as_str())],
    );
    let before = fs::read(&source).expect("read source");
    let output = workspace.path("codes");

    let err = process(&source, &output, &mut SeenNames::new()).expect_err("oversized payload");

    assert_eq!(err.kind(), ErrorKind::Encode);
    assert_eq!(fs::read(&source).expect("read source"), before);
    // artifacts written before the failure remain
    assert!(output.join("alice.png").is_file());
    assert!(!output.join("huge.png").exists());
}

#[test]
fn header_only_sheet_is_saved_without_images() {
    let workspace = support::TestWorkspace::new();
    let source = workspace.create_rows("empty.xlsx", &[]);
    let output = workspace.path("codes");

    let summary = process(&source, &output, &mut SeenNames::new()).expect("process");

    assert_eq!(summary.rows_scanned, 0);
    assert!(summary.embeds.is_empty());
    assert!(output.is_dir());
    assert!(support::png_files(&output).is_empty());
}
