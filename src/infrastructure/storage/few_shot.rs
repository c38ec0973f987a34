use std::io;
use std::path::Path;

use crate::application::services::FewShotExample;

/// Loads a worked form-extraction example: the OCR text and the JSON it should produce.
pub async fn read_few_shot_example(ocr_path: &Path, json_path: &Path) -> io::Result<FewShotExample> {
    let ocr_text = tokio::fs::read_to_string(ocr_path).await?;
    let raw_json = tokio::fs::read_to_string(json_path).await?;
    let expected = serde_json::from_str(&raw_json).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{}: {e}", json_path.display()),
        )
    })?;

    Ok(FewShotExample { ocr_text, expected })
}
