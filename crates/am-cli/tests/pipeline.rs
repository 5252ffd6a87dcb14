//! End-to-end tests for the batch conversion pipeline.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use am_cli::pipeline::{ConvertOptions, convert_files};
use am_cli::types::FileOutcome;
use am_model::{LayoutSpec, NITROGEN_MOLAR_MASS, known_layouts};

fn layout(name: &str) -> LayoutSpec {
    known_layouts()
        .into_iter()
        .find(|layout| layout.name == name)
        .expect("known layout")
}

/// One CSV row shaped to the layout's required columns, empty except for
/// the named cells.
fn csv_row(layout: &LayoutSpec, values: &[(&str, &str)]) -> String {
    let mut cells = vec![String::new(); layout.required_columns.len()];
    for (name, value) in values {
        let index = layout
            .required_columns
            .iter()
            .position(|required| required == name)
            .unwrap_or_else(|| panic!("column {name} not in layout"));
        cells[index] = (*value).to_string();
    }
    cells.join(",")
}

/// The header row as the lab emits it: untitled columns are blank cells.
fn header_row(layout: &LayoutSpec) -> String {
    layout
        .required_columns
        .iter()
        .map(|name| {
            if name.starts_with("Unnamed") {
                String::new()
            } else {
                name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn write_report(dir: &Path, filename: &str, layout: &LayoutSpec, rows: &[Vec<(&str, &str)>]) -> PathBuf {
    let mut contents = String::new();
    contents.push_str("CSBP Lab,Analysis Report\n");
    contents.push_str("Job 1234\n");
    contents.push_str(&header_row(layout));
    contents.push('\n');
    contents.push_str(&csv_row(layout, &[("Lab Number", "units")]));
    contents.push('\n');
    for row in rows {
        contents.push_str(&csv_row(layout, row));
        contents.push('\n');
    }
    let path = dir.join(filename);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Field index of a canonical column in the output CSV.
fn field_pos(layout: &LayoutSpec, canonical: &str) -> usize {
    let index = layout
        .analysis_columns
        .iter()
        .position(|name| name == canonical)
        .unwrap_or_else(|| panic!("{canonical} is not an analysis column"));
    1 + 2 * index
}

#[test]
fn water_report_converts_end_to_end() {
    let dir = TempDir::new().unwrap();
    let water = layout("water");
    let input = write_report(
        dir.path(),
        "water_report.csv",
        &water,
        &[
            vec![
                ("Name", "100/12345"),
                ("Ammonium Nitrogen", "14.01"),
                ("Nitrate Nitrogen", "<0.01"),
                ("Conductivity", "50"),
                ("pH", "7.5"),
            ],
            vec![("Name", "9999"), ("pH", "None")],
        ],
    );

    let result = convert_files(&[input.clone()], &ConvertOptions::default());
    assert!(!result.has_errors);
    assert_eq!(result.files.len(), 1);

    let FileOutcome::Converted {
        layout: matched,
        rows,
        output,
        review_count,
    } = &result.files[0].outcome
    else {
        panic!("expected conversion, got {:?}", result.files[0].outcome);
    };
    assert_eq!(matched, "water");
    assert_eq!(*rows, 2);
    assert_eq!(*review_count, 1);

    let output = output.as_ref().expect("output written");
    assert_eq!(
        output.file_name().unwrap().to_str().unwrap(),
        "water_report_AM_WATER_format_UPDATE.csv"
    );

    let contents = std::fs::read_to_string(output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);

    // header: sample_id then each analysis column paired with its _meth
    let mut expected_header = vec!["sample_id".to_string()];
    for analysis in &water.analysis_columns {
        expected_header.push(analysis.clone());
        expected_header.push(format!("{analysis}_meth"));
    }
    assert_eq!(lines[0], expected_header.join(","));

    let first: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(first[0], "102.100.100/12345");

    let ammonium: f64 = first[field_pos(&water, "ammonium")].parse().unwrap();
    let expected_ammonium = 14.01 * 1000.0 / NITROGEN_MOLAR_MASS;
    assert!((ammonium - expected_ammonium).abs() < 1e-6);
    assert_eq!(first[field_pos(&water, "ammonium") + 1], "2.1");

    assert_eq!(first[field_pos(&water, "nitrate_nitrite")], "<0.01");
    assert_eq!(first[field_pos(&water, "nitrate_nitrite") + 1], "2.1");

    assert_eq!(first[field_pos(&water, "conductivity_aqueous")], "5");
    assert_eq!(first[field_pos(&water, "conductivity_aqueous") + 1], "2.1");

    assert_eq!(first[field_pos(&water, "ph")], "7.5");
    assert_eq!(first[field_pos(&water, "ph") + 1], "2.1");

    // unmeasured analyses carry no value and no provenance
    assert_eq!(first[field_pos(&water, "chloride")], "");
    assert_eq!(first[field_pos(&water, "chloride") + 1], "");

    let second: Vec<&str> = lines[2].split(',').collect();
    assert_eq!(second[0], "102.100.100/9999");
    // textual None collapses to missing, so no provenance either
    assert_eq!(second[field_pos(&water, "ph")], "");
    assert_eq!(second[field_pos(&water, "ph") + 1], "");
}

#[test]
fn soil_report_output_has_no_depth_columns() {
    let dir = TempDir::new().unwrap();
    let soil = layout("soil");
    let input = write_report(
        dir.path(),
        "soil_report.csv",
        &soil,
        &[vec![
            ("Name", "102.100.100/77"),
            ("Depth", "0-10cm"),
            ("Colour", "Brown"),
        ]],
    );

    let result = convert_files(&[input], &ConvertOptions::default());
    let FileOutcome::Converted { layout: matched, output, .. } = &result.files[0].outcome else {
        panic!("expected conversion, got {:?}", result.files[0].outcome);
    };
    assert_eq!(matched, "soil");

    let contents = std::fs::read_to_string(output.as_ref().unwrap()).unwrap();
    let header = contents.lines().next().unwrap();
    let names: Vec<&str> = header.split(',').collect();
    assert!(!names.contains(&"depth"));
    assert!(!names.contains(&"depth_meth"));
    assert!(names.contains(&"color"));
}

#[test]
fn unknown_report_layout_is_skipped_without_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("other_lab.csv");
    std::fs::write(
        &path,
        "Name,Customer,Turbidity\nunits,units,units\ns1,AM,3.2\n",
    )
    .unwrap();

    let before = std::fs::read_dir(dir.path()).unwrap().count();
    let result = convert_files(&[path], &ConvertOptions::default());
    assert!(matches!(result.files[0].outcome, FileOutcome::Unrecognized));
    assert!(!result.has_errors);
    let after = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(before, after, "no output file may be produced");
}

#[test]
fn non_report_file_is_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.csv");
    std::fs::write(&path, "a,b,c\n1,2,3\n").unwrap();

    let result = convert_files(&[path], &ConvertOptions::default());
    assert!(matches!(
        result.files[0].outcome,
        FileOutcome::NotReportFormat
    ));
    assert!(!result.has_errors);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let water = layout("water");
    let input = write_report(
        dir.path(),
        "water_report.csv",
        &water,
        &[vec![("Name", "100/1"), ("pH", "7.0")]],
    );

    let options = ConvertOptions {
        dry_run: true,
        ..ConvertOptions::default()
    };
    let result = convert_files(&[input], &options);
    let FileOutcome::Converted { output, .. } = &result.files[0].outcome else {
        panic!("expected conversion");
    };
    assert!(output.is_none());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn output_dir_redirects_converted_files() {
    let dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let water = layout("water");
    let input = write_report(
        dir.path(),
        "water_report.csv",
        &water,
        &[vec![("Name", "100/1")]],
    );

    let options = ConvertOptions {
        output_dir: Some(out_dir.path().to_path_buf()),
        dry_run: false,
    };
    let result = convert_files(&[input], &options);
    let FileOutcome::Converted { output, .. } = &result.files[0].outcome else {
        panic!("expected conversion");
    };
    let output = output.as_ref().unwrap();
    assert_eq!(output.parent().unwrap(), out_dir.path());
    assert!(output.exists());
}

#[test]
fn one_bad_file_does_not_abort_the_batch() {
    let dir = TempDir::new().unwrap();
    let water = layout("water");
    let bad = write_report(
        dir.path(),
        "bad_report.csv",
        &water,
        &[vec![("Name", "100/1"), ("Conductivity", "pending")]],
    );
    let good = write_report(
        dir.path(),
        "good_report.csv",
        &water,
        &[vec![("Name", "100/2"), ("Conductivity", "50")]],
    );

    let result = convert_files(&[bad, good], &ConvertOptions::default());
    assert!(result.has_errors);
    assert!(matches!(
        result.files[0].outcome,
        FileOutcome::Failed { .. }
    ));
    assert!(matches!(
        result.files[1].outcome,
        FileOutcome::Converted { .. }
    ));
}
