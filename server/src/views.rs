//! HTML views, rendered as plain string templates.

use naildx::Diagnosis;

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         <nav><a href=\"/\">Home</a> | <a href=\"/nailprediction\">Diagnose</a> | <a href=\"/about\">About</a></nav>\n\
         {body}\n\
         </body>\n\
         </html>\n"
    )
}

/// Landing page
pub fn index_page() -> String {
    layout(
        "Nail Diagnosis",
        "<h1>Nail Diagnosis</h1>\n\
         <p>Upload a photograph of a fingernail or toenail and get a predicted\n\
         condition with a confidence score, produced by a pretrained\n\
         convolutional network.</p>\n\
         <p><a href=\"/nailprediction\">Start a diagnosis</a></p>",
    )
}

/// About page
pub fn about_page() -> String {
    layout(
        "About - Nail Diagnosis",
        "<h1>About</h1>\n\
         <p>This service classifies nail images into 15 known conditions using\n\
         a VGG16-based model. Predictions are informational only and are not a\n\
         substitute for medical advice.</p>",
    )
}

/// Upload form page
pub fn upload_form_page() -> String {
    layout(
        "Diagnose - Nail Diagnosis",
        "<h1>Upload a nail image</h1>\n\
         <form action=\"/nailresult\" method=\"post\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" name=\"image\" accept=\".png,.jpg,.jpeg\" required>\n\
         <button type=\"submit\">Diagnose</button>\n\
         </form>\n\
         <p>Accepted formats: PNG, JPG, JPEG.</p>",
    )
}

/// Result page showing the diagnosis, its confidence, and the uploaded image.
///
/// Labels come from the fixed table and filenames are sanitized on save, so
/// neither needs HTML escaping here.
pub fn result_page(diagnosis: &Diagnosis) -> String {
    layout(
        "Result - Nail Diagnosis",
        &format!(
            "<h1>Prediction Result</h1>\n\
             <p>Diagnosis: <strong>{label}</strong></p>\n\
             <p>Confidence: {confidence:.2}%</p>\n\
             <img src=\"/uploads/{filename}\" alt=\"uploaded nail image\" width=\"300\">\n\
             <p><a href=\"/nailprediction\">Diagnose another image</a></p>",
            label = diagnosis.label,
            confidence = diagnosis.confidence,
            filename = diagnosis.filename,
        ),
    )
}
