//! multipart/form-data intake
//!
//! Text parts carry the complaint fields; file parts are measured and
//! discarded, only `{filename, media_type, size}` is kept.

use axum::extract::Multipart;
use axum::extract::multipart::Field;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Attachment, ComplaintDraft, ComplaintType, MAX_ATTACHMENT_SIZE, MAX_ATTACHMENTS, Urgency,
};

/// Request body cap for the form route: every file at its limit plus text
pub const MAX_FORM_BODY: usize = MAX_ATTACHMENTS * MAX_ATTACHMENT_SIZE as usize + 1024 * 1024;

#[derive(Default)]
struct FormFields {
    name: Option<String>,
    email: Option<String>,
    complaint_type: Option<String>,
    location: Option<String>,
    description: Option<String>,
    urgency: Option<String>,
    attachments: Vec<Attachment>,
}

/// Read the whole form into a draft (not yet validated)
pub async fn read_draft(mut multipart: Multipart) -> AppResult<ComplaintDraft> {
    let mut form = FormFields::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if field.file_name().is_some() {
            if let Some(attachment) = measure_file(field).await? {
                if form.attachments.len() >= MAX_ATTACHMENTS {
                    return Err(AppError::with_message(
                        ErrorCode::TooManyAttachments,
                        format!("At most {} attachments are allowed", MAX_ATTACHMENTS),
                    )
                    .with_detail("field", "attachments"));
                }
                form.attachments.push(attachment);
            }
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?;
        match name.as_str() {
            "name" => form.name = Some(text),
            "email" => form.email = Some(text),
            "type" => form.complaint_type = Some(text),
            "location" => form.location = Some(text),
            "description" => form.description = Some(text),
            "urgency" => form.urgency = Some(text),
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    form.into_draft()
}

/// Stream a file part, counting bytes. Empty unnamed parts (no file chosen)
/// yield `None`.
async fn measure_file(mut field: Field<'_>) -> AppResult<Option<Attachment>> {
    let filename = field.file_name().unwrap_or_default().to_string();
    let declared = field.content_type().map(|s| s.to_string());

    let mut size: u64 = 0;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?
    {
        size += chunk.len() as u64;
        if size > MAX_ATTACHMENT_SIZE {
            return Err(AppError::with_message(
                ErrorCode::AttachmentTooLarge,
                format!(
                    "{} exceeds the maximum size of {}MB",
                    filename,
                    MAX_ATTACHMENT_SIZE / 1024 / 1024
                ),
            )
            .with_detail("field", "attachments")
            .with_detail("filename", filename));
        }
    }

    if filename.is_empty() && size == 0 {
        return Ok(None);
    }

    let media_type = declared
        .filter(|ct| ct != "application/octet-stream")
        .unwrap_or_else(|| {
            mime_guess::from_path(&filename)
                .first_or_octet_stream()
                .essence_str()
                .to_string()
        });

    Ok(Some(Attachment::new(filename, media_type, size)))
}

impl FormFields {
    fn into_draft(self) -> AppResult<ComplaintDraft> {
        let complaint_type: ComplaintType = required(self.complaint_type, "type")?.parse()?;
        let urgency = match self.urgency.filter(|u| !u.trim().is_empty()) {
            Some(u) => u.parse::<Urgency>()?,
            None => Urgency::default(),
        };

        Ok(ComplaintDraft {
            name: required(self.name, "name")?,
            email: required(self.email, "email")?,
            complaint_type,
            location: required(self.location, "location")?,
            description: required(self.description, "description")?,
            urgency,
            attachments: self.attachments,
        })
    }
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    value.ok_or_else(|| {
        AppError::with_message(ErrorCode::RequiredField, format!("{field} is required"))
            .with_detail("field", field)
    })
}
