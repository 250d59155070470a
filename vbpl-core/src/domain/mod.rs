use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of legislative document a worksheet tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocType {
    /// Nghị quyết của HĐND tỉnh
    #[serde(rename = "NQ")]
    Nq,
    /// Quyết định của UBND tỉnh
    #[serde(rename = "QD_UBND")]
    QdUbnd,
    /// Quyết định của Chủ tịch UBND tỉnh
    #[serde(rename = "QD_CT_UBND")]
    QdCtUbnd,
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocType::Nq => write!(f, "NQ"),
            DocType::QdUbnd => write!(f, "QD_UBND"),
            DocType::QdCtUbnd => write!(f, "QD_CT_UBND"),
        }
    }
}

/// Whether the documents on a worksheet still need handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocStatus {
    #[serde(rename = "can_xu_ly")]
    CanXuLy,
    #[serde(rename = "da_xu_ly")]
    DaXuLy,
}

impl fmt::Display for DocStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocStatus::CanXuLy => write!(f, "can_xu_ly"),
            DocStatus::DaXuLy => write!(f, "da_xu_ly"),
        }
    }
}

/// How a tracked document group is being processed, derived from the four
/// count columns under "Hình thức xử lý".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingForm {
    #[serde(rename = "thay_the")]
    ThayThe,
    #[serde(rename = "bai_bo")]
    BaiBo,
    #[serde(rename = "ban_hanh_moi")]
    BanHanhMoi,
    #[serde(rename = "chua_xac_dinh")]
    ChuaXacDinh,
}

impl fmt::Display for ProcessingForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingForm::ThayThe => write!(f, "thay_the"),
            ProcessingForm::BaiBo => write!(f, "bai_bo"),
            ProcessingForm::BanHanhMoi => write!(f, "ban_hanh_moi"),
            ProcessingForm::ChuaXacDinh => write!(f, "chua_xac_dinh"),
        }
    }
}

/// An agency that drafts documents, e.g. "Sở Tư pháp".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agency {
    pub id: i64,
    pub name: String,
}

/// One row of a tracking worksheet, normalized and ready for the `documents`
/// table. Field names match the table's columns so the struct serializes
/// straight into a PostgREST insert payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub doc_type: DocType,
    pub status: DocStatus,
    /// Position within the sheet, either the sheet's own STT value or a
    /// running counter.
    pub stt: i64,
    pub name: String,
    pub agency_id: Option<i64>,
    pub handler_name: Option<String>,
    pub processing_form: Option<ProcessingForm>,
    pub count_thay_the: i64,
    pub count_bai_bo: i64,
    pub count_ban_hanh_moi: i64,
    pub count_chua_xac_dinh: i64,
    pub reg_doc_agency: Option<String>,
    pub reg_doc_ubnd: Option<String>,
    pub approval_hdnd: Option<String>,
    pub expected_date: Option<String>,
    pub feedback_sent: Option<String>,
    pub appraisal_sent: Option<String>,
    pub submitted_ubnd: Option<String>,
    pub submitted_hdnd: Option<String>,
    pub issuance_number: Option<String>,
    pub processing_time: Option<String>,
    pub notes: Option<String>,
    /// Tracking year the workbook covers.
    pub year: i32,
}

/// Identifier echoed back by the datastore for each inserted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertedDocument {
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enums_serialize_to_wire_names() {
        assert_eq!(serde_json::to_string(&DocType::QdCtUbnd).unwrap(), "\"QD_CT_UBND\"");
        assert_eq!(serde_json::to_string(&DocStatus::CanXuLy).unwrap(), "\"can_xu_ly\"");
        assert_eq!(
            serde_json::to_string(&ProcessingForm::BanHanhMoi).unwrap(),
            "\"ban_hanh_moi\""
        );

        // Display mirrors the wire form so log lines and payloads agree
        assert_eq!(DocType::Nq.to_string(), "NQ");
        assert_eq!(DocStatus::DaXuLy.to_string(), "da_xu_ly");
        assert_eq!(ProcessingForm::ThayThe.to_string(), "thay_the");
    }
}
