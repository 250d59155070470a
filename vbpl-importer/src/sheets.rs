use vbpl_core::domain::{DocStatus, DocType};

/// Workbook shipped by the provincial justice department each year.
pub const DEFAULT_WORKBOOK: &str = "Docs/2026-Theo Doi Tien Do Ban Hanh VBQPPL.xlsx";

/// Tracking year stamped on records when the CLI does not override it.
pub const DEFAULT_YEAR: i32 = 2026;

/// A tracking worksheet and the classification of every document on it.
#[derive(Debug, Clone, Copy)]
pub struct SheetSpec {
    pub sheet_name: &'static str,
    pub doc_type: DocType,
    pub status: DocStatus,
}

/// The five tracked worksheets, in workbook order. Sheets missing from the
/// file are skipped at run time.
pub const SHEET_MAP: [SheetSpec; 5] = [
    SheetSpec {
        sheet_name: "NQ can xu ly",
        doc_type: DocType::Nq,
        status: DocStatus::CanXuLy,
    },
    SheetSpec {
        sheet_name: "QD UBND can xu ly",
        doc_type: DocType::QdUbnd,
        status: DocStatus::CanXuLy,
    },
    SheetSpec {
        sheet_name: "QD CT.UBND",
        doc_type: DocType::QdCtUbnd,
        status: DocStatus::CanXuLy,
    },
    SheetSpec {
        sheet_name: "NQ HDND da xu ly",
        doc_type: DocType::Nq,
        status: DocStatus::DaXuLy,
    },
    SheetSpec {
        sheet_name: "QD UBND da xu ly",
        doc_type: DocType::QdUbnd,
        status: DocStatus::DaXuLy,
    },
];
