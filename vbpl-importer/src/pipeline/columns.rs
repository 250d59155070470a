//! Header matching for the tracking sheets.
//!
//! Every sheet lays its columns out a little differently, so fields are
//! located by keyword instead of by fixed position.

use std::collections::HashMap;

/// Semantic fields a sheet's header row can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocField {
    Stt,
    Name,
    Agency,
    Handler,
    FormRoot,
    RegDocAgency,
    RegDocUbnd,
    ApprovalHdnd,
    ExpectedDate,
    FeedbackSent,
    AppraisalSent,
    SubmittedUbnd,
    SubmittedHdnd,
    IssuanceNumber,
    ProcessingTime,
    Notes,
}

/// Candidate substrings per field. A field can list several phrasings because
/// the sheets do not spell their headers consistently.
pub const COLUMN_KEYWORDS: &[(DocField, &[&str])] = &[
    (DocField::Stt, &["STT"]),
    (DocField::Name, &["Tên gọi"]),
    (DocField::Agency, &["Cơ quan soạn"]),
    (DocField::Handler, &["Người xử lý"]),
    (DocField::FormRoot, &["Hình thức xử lý"]),
    (
        DocField::RegDocAgency,
        &["đăng ký xây dựng NQ của cơ quan", "VB đăng ký xây dựng", "đăng ký xây dựng"],
    ),
    (DocField::RegDocUbnd, &["đăng ký xây dựng NQ của UBND"]),
    (DocField::ApprovalHdnd, &["Ý kiến chấp thuận"]),
    (DocField::ExpectedDate, &["dự kiến trình ban hành", "Ngày dự kiến"]),
    (DocField::FeedbackSent, &["lấy ý kiến góp ý"]),
    (DocField::AppraisalSent, &["Sở Tư pháp thẩm định", "gửi Sở Tư pháp"]),
    (DocField::SubmittedUbnd, &["trình UBND tỉnh"]),
    (DocField::SubmittedHdnd, &["UBND tỉnh trình HĐND"]),
    (DocField::IssuanceNumber, &["Số, trích yếu", "Số, ngày", "ban hành VBQPPL"]),
    (DocField::ProcessingTime, &["Thời gian xử lý"]),
    (DocField::Notes, &["Ghi chú"]),
];

/// Column index used for "Hình thức xử lý" when no header matches. The four
/// count columns hang off this root at offsets 0..=3.
pub const FALLBACK_FORM_ROOT: usize = 3;

/// Field-to-column mapping resolved from one sheet's header row.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    indices: HashMap<DocField, usize>,
}

impl ColumnMap {
    pub fn get(&self, field: DocField) -> Option<usize> {
        self.indices.get(&field).copied()
    }

    /// Root of the four processing-form count columns.
    pub fn form_root(&self) -> usize {
        self.get(DocField::FormRoot).unwrap_or(FALLBACK_FORM_ROOT)
    }
}

/// Resolves each field to the leftmost header containing any of its keywords,
/// case-insensitively. Unmatched fields stay absent; most sheets only carry a
/// subset of the columns.
pub fn locate_columns(headers: &[String]) -> ColumnMap {
    let mut indices = HashMap::new();
    for (field, keywords) in COLUMN_KEYWORDS {
        if let Some(idx) = find_column(headers, keywords) {
            indices.insert(*field, idx);
        }
    }
    ColumnMap { indices }
}

fn find_column(headers: &[String], keywords: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        if header.is_empty() {
            return false;
        }
        let header = header.to_lowercase();
        keywords.iter().any(|keyword| header.contains(&keyword.to_lowercase()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[test]
    fn test_leftmost_matching_header_wins() {
        let map = locate_columns(&headers(&["STT", "Tên gọi NQ", "Tên gọi cũ"]));
        assert_eq!(map.get(DocField::Stt), Some(0));
        assert_eq!(map.get(DocField::Name), Some(1));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let map = locate_columns(&headers(&["stt", "tên gọi nghị quyết"]));
        assert_eq!(map.get(DocField::Stt), Some(0));
        assert_eq!(map.get(DocField::Name), Some(1));
    }

    #[test]
    fn test_unmatched_fields_are_absent() {
        let map = locate_columns(&headers(&["STT", "Tên gọi"]));
        assert_eq!(map.get(DocField::Notes), None);
        assert_eq!(map.get(DocField::Agency), None);
    }

    #[test]
    fn test_form_root_falls_back_to_fixed_column() {
        let with_header = locate_columns(&headers(&["STT", "Tên gọi", "Hình thức xử lý"]));
        assert_eq!(with_header.form_root(), 2);

        let without = locate_columns(&headers(&["STT", "Tên gọi"]));
        assert_eq!(without.form_root(), FALLBACK_FORM_ROOT);
    }

    #[test]
    fn test_registration_columns_resolve_side_by_side() {
        // Both registration columns present: each field lands on its own column
        let map = locate_columns(&headers(&[
            "STT",
            "VB đăng ký xây dựng NQ của cơ quan chủ trì",
            "VB đăng ký xây dựng NQ của UBND tỉnh",
        ]));
        assert_eq!(map.get(DocField::RegDocAgency), Some(1));
        assert_eq!(map.get(DocField::RegDocUbnd), Some(2));

        // Only the UBND phrasing present: the broad keyword points the agency
        // field at the same column
        let map = locate_columns(&headers(&["STT", "VB đăng ký xây dựng NQ của UBND tỉnh"]));
        assert_eq!(map.get(DocField::RegDocAgency), Some(1));
        assert_eq!(map.get(DocField::RegDocUbnd), Some(1));
    }

    #[test]
    fn test_empty_headers_never_match() {
        let map = locate_columns(&headers(&["", "", "STT"]));
        assert_eq!(map.get(DocField::Stt), Some(2));
    }
}
