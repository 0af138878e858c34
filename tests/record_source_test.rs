//! Tests for the CSV record source

use rstest::rstest;

use orgunit_tree::application::services::CsvRecordSource;

const ROW: &str =
    "C1,CourseOne,P1,PartA,SP1,Physics,M1,Mod1,S1,Ser1,E1,EventA,Lecture,2024-01-01T09:00,2024-01-01T10:00";

#[test]
fn given_row_when_decoding_then_maps_columns_by_position() {
    let ingest = CsvRecordSource::new().decode(ROW.as_bytes());

    assert!(ingest.issues.is_empty());
    assert_eq!(ingest.records.len(), 1);
    let r = &ingest.records[0];
    assert_eq!(r.course_id, "C1");
    assert_eq!(r.course_name, "CourseOne");
    assert_eq!(r.part_id, "P1");
    assert_eq!(r.part_name, "PartA");
    assert_eq!(r.subject(), Some(("SP1", "Physics")));
    assert_eq!(r.module_id, "M1");
    assert_eq!(r.series_name, "Ser1");
    assert_eq!(r.event_id, "E1");
    assert_eq!(r.event_title, "EventA");
    assert_eq!(r.event_type, "Lecture");
    assert_eq!(r.event_start, "2024-01-01T09:00");
    assert_eq!(r.event_end, "2024-01-01T10:00");
    assert_eq!(r.line, 1);
}

#[test]
fn given_empty_subject_columns_when_decoding_then_subject_is_absent() {
    let input = "C1,CourseOne,P1,PartA,,,M1,Mod1,S1,Ser1,E1,EventA,Lecture,a,b\n";

    let ingest = CsvRecordSource::new().decode(input.as_bytes());

    assert_eq!(ingest.records[0].subject_id, None);
    assert_eq!(ingest.records[0].subject(), None);
}

#[test]
fn given_first_row_when_decoding_then_it_is_not_treated_as_header() {
    let input = format!("{ROW}\n{ROW}\n");

    let ingest = CsvRecordSource::new().decode(input.as_bytes());

    assert_eq!(ingest.records.len(), 2);
}

#[test]
fn given_quoted_field_with_comma_when_decoding_then_keeps_it_whole() {
    let input = "C1,CourseOne,P1,PartA,,,M1,Mod1,S1,Ser1,E1,\"Bonds, practical\",Practical,a,b";

    let ingest = CsvRecordSource::new().decode(input.as_bytes());

    assert_eq!(ingest.records[0].event_title, "Bonds, practical");
}

#[rstest]
#[case::too_few("C1,CourseOne,P1", 3)]
#[case::too_many(
    "C1,CourseOne,P1,PartA,,,M1,Mod1,S1,Ser1,E1,EventA,Lecture,a,b,extra",
    16
)]
fn given_wrong_column_count_when_decoding_then_row_is_skipped_and_reported(
    #[case] bad: &str,
    #[case] found: usize,
) {
    let input = format!("{ROW}\n{bad}\n{ROW}\n");

    let ingest = CsvRecordSource::new().decode(input.as_bytes());

    assert_eq!(ingest.records.len(), 2);
    assert_eq!(ingest.records[1].line, 3);
    assert_eq!(ingest.issues.len(), 1);
    assert_eq!(ingest.issues[0].line, 2);
    assert_eq!(
        ingest.issues[0].message,
        format!("expected 15 columns, found {found}")
    );
}

#[test]
fn given_invalid_utf8_row_when_decoding_then_processing_continues() {
    let mut input = Vec::new();
    input.extend_from_slice(ROW.as_bytes());
    input.extend_from_slice(b"\nC1,Course\xff,P1,PartA,,,M1,Mod1,S1,Ser1,E2,EventB,Lecture,a,b\n");
    input.extend_from_slice(ROW.as_bytes());

    let ingest = CsvRecordSource::new().decode(input.as_slice());

    assert_eq!(ingest.records.len(), 2);
    assert_eq!(ingest.issues.len(), 1);
}

#[rstest]
#[case::untrimmed(false, " C1 ")]
#[case::trimmed(true, "C1")]
fn given_padded_fields_when_decoding_then_trim_setting_applies(
    #[case] trim: bool,
    #[case] expected: &str,
) {
    let input = " C1 ,CourseOne,P1,PartA,,,M1,Mod1,S1,Ser1,E1,EventA,Lecture,a,b";

    let ingest = CsvRecordSource::new().with_trim(trim).decode(input.as_bytes());

    assert_eq!(ingest.records[0].course_id, expected);
}

#[test]
fn given_empty_input_when_decoding_then_nothing_is_produced() {
    let ingest = CsvRecordSource::new().decode("".as_bytes());

    assert!(ingest.records.is_empty());
    assert!(ingest.issues.is_empty());
}
