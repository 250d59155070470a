use calamine::Data;

use vbpl_core::domain::{DocStatus, DocType, DocumentRecord, ProcessingForm};

use crate::pipeline::columns::{ColumnMap, DocField};
use crate::workbook::{cell_count, cell_ordinal, cell_text};

/// One sheet row reduced to a record, before the drafting agency is resolved.
///
/// The normalizer never touches the datastore. It hands back the raw agency
/// name and the driver swaps it for an id.
#[derive(Debug, Clone)]
pub struct ParsedRow {
    pub record: DocumentRecord,
    pub agency_name: Option<String>,
}

/// Normalizes a data row into a [`ParsedRow`].
///
/// Rows with a blank name are skipped entirely and do not advance `seq`. The
/// emitted sequence number is the sheet's own STT value when it parses to a
/// number ≥ 1, the running counter otherwise.
pub fn normalize_row(
    row: &[Data],
    columns: &ColumnMap,
    doc_type: DocType,
    status: DocStatus,
    seq: &mut i64,
    year: i32,
) -> Option<ParsedRow> {
    let name = cell_text(row, columns.get(DocField::Name))?;

    *seq += 1;
    let stt = cell_ordinal(row, columns.get(DocField::Stt))
        .filter(|n| *n >= 1)
        .unwrap_or(*seq);

    // The four count columns sit at fixed offsets from the form root
    let base = columns.form_root();
    let count_thay_the = cell_count(row, base);
    let count_bai_bo = cell_count(row, base + 1);
    let count_ban_hanh_moi = cell_count(row, base + 2);
    let count_chua_xac_dinh = cell_count(row, base + 3);

    let processing_form = derive_processing_form([
        (ProcessingForm::ThayThe, count_thay_the),
        (ProcessingForm::BaiBo, count_bai_bo),
        (ProcessingForm::BanHanhMoi, count_ban_hanh_moi),
        (ProcessingForm::ChuaXacDinh, count_chua_xac_dinh),
    ]);

    let record = DocumentRecord {
        doc_type,
        status,
        stt,
        name,
        agency_id: None,
        handler_name: cell_text(row, columns.get(DocField::Handler)),
        processing_form,
        count_thay_the,
        count_bai_bo,
        count_ban_hanh_moi,
        count_chua_xac_dinh,
        reg_doc_agency: cell_text(row, columns.get(DocField::RegDocAgency)),
        reg_doc_ubnd: cell_text(row, columns.get(DocField::RegDocUbnd)),
        approval_hdnd: cell_text(row, columns.get(DocField::ApprovalHdnd)),
        expected_date: cell_text(row, columns.get(DocField::ExpectedDate)),
        feedback_sent: cell_text(row, columns.get(DocField::FeedbackSent)),
        appraisal_sent: cell_text(row, columns.get(DocField::AppraisalSent)),
        submitted_ubnd: cell_text(row, columns.get(DocField::SubmittedUbnd)),
        submitted_hdnd: cell_text(row, columns.get(DocField::SubmittedHdnd)),
        issuance_number: cell_text(row, columns.get(DocField::IssuanceNumber)),
        processing_time: cell_text(row, columns.get(DocField::ProcessingTime)),
        notes: cell_text(row, columns.get(DocField::Notes)),
        year,
    };

    Some(ParsedRow {
        agency_name: cell_text(row, columns.get(DocField::Agency)),
        record,
    })
}

/// Picks the dominant processing form from the four category counts.
///
/// A single positive count names the form directly. With several positive
/// counts the strictly largest wins, and on a tie the earlier category in the
/// fixed order keeps it. All zeros mean no form.
pub fn derive_processing_form(counts: [(ProcessingForm, i64); 4]) -> Option<ProcessingForm> {
    let mut best: Option<(ProcessingForm, i64)> = None;
    for (form, count) in counts {
        if count > 0 && best.map_or(true, |(_, max)| count > max) {
            best = Some((form, count));
        }
    }
    best.map(|(form, _)| form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::columns::locate_columns;

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    fn n(value: f64) -> Data {
        Data::Float(value)
    }

    fn standard_columns() -> ColumnMap {
        let headers: Vec<String> = [
            "STT",
            "Tên gọi NQ",
            "Cơ quan soạn thảo",
            "Hình thức xử lý",
            "",
            "",
            "",
            "Người xử lý",
            "Ghi chú",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect();
        locate_columns(&headers)
    }

    #[test]
    fn test_blank_name_skips_row_without_advancing_counter() {
        let columns = standard_columns();
        let mut seq = 0;

        for name_cell in [Data::Empty, s("   "), s("None")] {
            let row = vec![n(1.0), name_cell, s("Sở Tài chính")];
            let parsed = normalize_row(&row, &columns, DocType::Nq, DocStatus::CanXuLy, &mut seq, 2026);
            assert!(parsed.is_none());
        }
        assert_eq!(seq, 0);
    }

    #[test]
    fn test_sequence_uses_ordinal_when_parseable() {
        let columns = standard_columns();
        let mut seq = 0;

        // Ordinal "12.0" overrides the counter
        let row = vec![s("12.0"), s("Nghị quyết A")];
        let parsed = normalize_row(&row, &columns, DocType::Nq, DocStatus::CanXuLy, &mut seq, 2026).unwrap();
        assert_eq!(parsed.record.stt, 12);

        // Unparseable ordinal falls back to the counter, now at 2
        let row = vec![s("abc"), s("Nghị quyết B")];
        let parsed = normalize_row(&row, &columns, DocType::Nq, DocStatus::CanXuLy, &mut seq, 2026).unwrap();
        assert_eq!(parsed.record.stt, 2);

        // Zero is not a valid ordinal
        let row = vec![n(0.0), s("Nghị quyết C")];
        let parsed = normalize_row(&row, &columns, DocType::Nq, DocStatus::CanXuLy, &mut seq, 2026).unwrap();
        assert_eq!(parsed.record.stt, 3);

        // Missing ordinal cell
        let row = vec![Data::Empty, s("Nghị quyết D")];
        let parsed = normalize_row(&row, &columns, DocType::Nq, DocStatus::CanXuLy, &mut seq, 2026).unwrap();
        assert_eq!(parsed.record.stt, 4);

        // Counter at 4, about to become 5: unparseable ordinal lands on 5
        let row = vec![s("abc"), s("Nghị quyết E")];
        let parsed = normalize_row(&row, &columns, DocType::Nq, DocStatus::CanXuLy, &mut seq, 2026).unwrap();
        assert_eq!(parsed.record.stt, 5);
    }

    #[test]
    fn test_counts_and_form_from_root_columns() {
        let columns = standard_columns();
        let mut seq = 0;

        let row = vec![
            n(1.0),
            s("Nghị quyết về mức thu phí"),
            s("Sở Tài chính"),
            n(2.0),
            Data::Empty,
            n(1.0),
            s("abc"),
            s(" Nguyễn Văn A "),
            s("None"),
        ];
        let parsed = normalize_row(&row, &columns, DocType::Nq, DocStatus::CanXuLy, &mut seq, 2026).unwrap();

        assert_eq!(parsed.record.count_thay_the, 2);
        assert_eq!(parsed.record.count_bai_bo, 0);
        assert_eq!(parsed.record.count_ban_hanh_moi, 1);
        assert_eq!(parsed.record.count_chua_xac_dinh, 0);
        assert_eq!(parsed.record.processing_form, Some(ProcessingForm::ThayThe));

        assert_eq!(parsed.agency_name, Some("Sở Tài chính".to_string()));
        assert_eq!(parsed.record.agency_id, None);
        assert_eq!(parsed.record.handler_name, Some("Nguyễn Văn A".to_string()));
        assert_eq!(parsed.record.notes, None);
        assert_eq!(parsed.record.year, 2026);
    }

    #[test]
    fn test_missing_form_header_reads_fixed_columns() {
        // No "Hình thức xử lý" header: counts still come from columns 3..=6
        let headers: Vec<String> = ["STT", "Tên gọi", "Cơ quan soạn"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let columns = locate_columns(&headers);
        let mut seq = 0;

        let row = vec![n(1.0), s("Quyết định X"), Data::Empty, n(0.0), n(3.0), n(0.0), n(0.0)];
        let parsed = normalize_row(&row, &columns, DocType::QdUbnd, DocStatus::DaXuLy, &mut seq, 2026).unwrap();
        assert_eq!(parsed.record.count_bai_bo, 3);
        assert_eq!(parsed.record.processing_form, Some(ProcessingForm::BaiBo));
    }

    #[test]
    fn test_form_derivation_single_and_largest() {
        assert_eq!(
            derive_processing_form([
                (ProcessingForm::ThayThe, 0),
                (ProcessingForm::BaiBo, 2),
                (ProcessingForm::BanHanhMoi, 0),
                (ProcessingForm::ChuaXacDinh, 0),
            ]),
            Some(ProcessingForm::BaiBo)
        );
        assert_eq!(
            derive_processing_form([
                (ProcessingForm::ThayThe, 3),
                (ProcessingForm::BaiBo, 5),
                (ProcessingForm::BanHanhMoi, 0),
                (ProcessingForm::ChuaXacDinh, 0),
            ]),
            Some(ProcessingForm::BaiBo)
        );
    }

    #[test]
    fn test_form_derivation_tie_keeps_first_category() {
        assert_eq!(
            derive_processing_form([
                (ProcessingForm::ThayThe, 2),
                (ProcessingForm::BaiBo, 2),
                (ProcessingForm::BanHanhMoi, 0),
                (ProcessingForm::ChuaXacDinh, 0),
            ]),
            Some(ProcessingForm::ThayThe)
        );
        assert_eq!(
            derive_processing_form([
                (ProcessingForm::ThayThe, 0),
                (ProcessingForm::BaiBo, 3),
                (ProcessingForm::BanHanhMoi, 3),
                (ProcessingForm::ChuaXacDinh, 3),
            ]),
            Some(ProcessingForm::BaiBo)
        );
    }

    #[test]
    fn test_form_derivation_all_zero_is_none() {
        assert_eq!(
            derive_processing_form([
                (ProcessingForm::ThayThe, 0),
                (ProcessingForm::BaiBo, 0),
                (ProcessingForm::BanHanhMoi, 0),
                (ProcessingForm::ChuaXacDinh, 0),
            ]),
            None
        );
    }
}
