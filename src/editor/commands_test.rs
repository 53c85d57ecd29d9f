use super::*;
use crate::editor::TextBuffer;
use chrono::NaiveDate;

fn sample_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 12, 31)
        .unwrap()
        .and_hms_opt(8, 5, 0)
        .unwrap()
}

#[test]
fn test_insert_date_replaces_selection() {
    let mut buffer = TextBuffer::with_text("Evolução: XXX");
    buffer.set_selection(Selection::range(12, 15)).unwrap();

    insert_date(&mut buffer, &sample_time()).unwrap();

    assert_eq!(buffer.text(), "Evolução: 31/12/2024 08:05 - ");
    assert_eq!(buffer.selection(), Selection::cursor(buffer.text().len()));
}

#[test]
fn test_toggle_case_text_cycle() {
    assert_eq!(toggle_case_text("PACIENTE ESTÁVEL"), "paciente estável");
    assert_eq!(toggle_case_text("paciente estável"), "Paciente Estável");
    assert_eq!(toggle_case_text("Paciente Estável"), "PACIENTE ESTÁVEL");
}

#[test]
fn test_toggle_case_capitalizes_after_non_letters() {
    assert_eq!(toggle_case_text("dor-abdominal/epigástrica"), "Dor-Abdominal/Epigástrica");
    assert_eq!(toggle_case_text("123 abc"), "123 Abc");
}

#[test]
fn test_toggle_case_text_without_letters() {
    // Text with no upper-case letters counts as lower case
    assert_eq!(toggle_case_text("120x80"), "120X80");
    assert_eq!(toggle_case_text("12/80"), "12/80");
}

#[test]
fn test_toggle_case_keeps_selection() {
    let mut buffer = TextBuffer::with_text("hd: pneumonia");
    buffer.set_selection(Selection::range(4, 13)).unwrap();

    assert!(toggle_case(&mut buffer).unwrap());

    assert_eq!(buffer.text(), "hd: Pneumonia");
    assert_eq!(buffer.selection(), Selection::range(4, 13));
}

#[test]
fn test_toggle_case_whole_document_when_no_selection() {
    let mut buffer = TextBuffer::with_text("beg, lote");

    assert!(toggle_case(&mut buffer).unwrap());

    assert_eq!(buffer.text(), "Beg, Lote");
}

#[test]
fn test_toggle_case_empty_document() {
    let mut buffer = TextBuffer::new();
    assert!(!toggle_case(&mut buffer).unwrap());
}
