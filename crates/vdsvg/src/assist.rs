// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A seam for a generative image/text service.
//!
//! No service is implemented here. A caller provides an [`Assistant`]
//! and gets the generated markup back, ready to be passed to [`translate`](crate::translate).

use base64::Engine;

/// A boxed error returned by an [`Assistant`].
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// A generative image/text service.
pub trait Assistant {
    /// Generates text for an optional image and an instruction.
    fn generate(&self, image: Option<&ImagePayload>, instruction: &str) -> Result<String, BoxedError>;
}

impl<F> Assistant for F
where
    F: Fn(Option<&ImagePayload>, &str) -> Result<String, BoxedError>,
{
    fn generate(&self, image: Option<&ImagePayload>, instruction: &str) -> Result<String, BoxedError> {
        (self)(image, instruction)
    }
}

/// A raster image sent to an [`Assistant`].
///
/// Only PNG and JPEG are accepted.
#[derive(Clone, Debug)]
pub struct ImagePayload {
    data: Vec<u8>,
    mime: &'static str,
}

impl ImagePayload {
    /// Creates a new payload.
    ///
    /// The format is detected from the data itself.
    pub fn new(data: Vec<u8>) -> Result<Self, AssistError> {
        let mime = match imagesize::image_type(&data) {
            Ok(imagesize::ImageType::Png) => "image/png",
            Ok(imagesize::ImageType::Jpeg) => "image/jpeg",
            _ => return Err(AssistError::UnsupportedImage),
        };

        Ok(ImagePayload { data, mime })
    }

    /// Returns the image MIME type.
    pub fn mime_type(&self) -> &str {
        self.mime
    }

    /// Returns the raw image data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the image data encoded as base64.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

/// An instruction for an [`Assistant`].
#[derive(Clone, Copy, Debug)]
pub enum Instruction<'a> {
    /// Trace an image into a Vector Drawable.
    ImageToVector,
    /// Draw a Vector Drawable from a text description.
    PromptToVector(&'a str),
    /// Describe an image, so the description can be used as a prompt later.
    DescribeImage,
}

impl Instruction<'_> {
    /// Renders the instruction text.
    pub fn to_text(&self) -> String {
        match *self {
            Instruction::ImageToVector => "Analyze this image and generate the XML code for an \
                Android Vector Drawable that represents it. Focus on the main shapes and colors. \
                The vector drawable should be simple and clean. Provide only the XML code as \
                a direct response, without any surrounding text, explanations, \
                or markdown formatting like ```xml."
                .to_string(),
            Instruction::PromptToVector(description) => format!(
                "From the following description, create a simple, clean Android Vector Drawable \
                 XML code. The description is: '{}'. IMPORTANT: The 'android:pathData' attribute \
                 MUST contain the literal SVG path data string, NOT a resource reference like \
                 '@string/path'. For colors, use hex codes or 'currentColor', NOT '@color/ref'. \
                 Provide only the raw XML code as a direct response, without any surrounding \
                 text or markdown formatting.",
                description
            ),
            Instruction::DescribeImage => "Describe this icon: its main subject, style, key \
                elements and color palette. Finish with a single prompt that could be used \
                to generate a similar icon."
                .to_string(),
        }
    }
}

/// Assistant errors.
#[derive(Debug)]
pub enum AssistError {
    /// Neither an image nor a description was provided.
    NoInput,

    /// An image is not a PNG or a JPEG.
    UnsupportedImage,

    /// The assistant itself has failed.
    GenerationFailed(BoxedError),
}

impl std::fmt::Display for AssistError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            AssistError::NoInput => write!(f, "an image or a description must be provided"),
            AssistError::UnsupportedImage => write!(f, "only PNG and JPEG images are supported"),
            AssistError::GenerationFailed(ref e) => write!(f, "generation failed cause {}", e),
        }
    }
}

impl std::error::Error for AssistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            AssistError::GenerationFailed(ref e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

/// Asks an assistant for a Vector Drawable.
///
/// An image takes precedence over a description.
/// A Markdown code fence around the response is removed.
pub fn generate_vector_drawable(
    assistant: &dyn Assistant,
    image: Option<&ImagePayload>,
    description: Option<&str>,
) -> Result<String, AssistError> {
    let description = description.map(str::trim).filter(|s| !s.is_empty());
    let instruction = match (image, description) {
        (Some(_), _) => Instruction::ImageToVector,
        (None, Some(d)) => Instruction::PromptToVector(d),
        (None, None) => return Err(AssistError::NoInput),
    };

    let text = assistant
        .generate(image, &instruction.to_text())
        .map_err(AssistError::GenerationFailed)?;

    Ok(strip_code_fence(&text).to_string())
}

/// Removes a Markdown code fence around a text.
///
/// Both ```` ```xml ```` and a bare ```` ``` ```` are handled.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let body = match text.strip_prefix("```xml") {
        Some(v) => v,
        None => match text.strip_prefix("```") {
            Some(v) => v,
            None => return text,
        },
    };

    body.strip_suffix("```").unwrap_or(body).trim()
}
