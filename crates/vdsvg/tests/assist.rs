use std::cell::RefCell;

use vdsvg::{generate_vector_drawable, AssistError, Assistant, BoxedError, ImagePayload};

const PNG_HEADER: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x10, 0x08, 0x06, 0x00, 0x00, 0x00,
];

struct Canned {
    response: &'static str,
    calls: RefCell<Vec<(Option<String>, String)>>,
}

impl Canned {
    fn new(response: &'static str) -> Self {
        Canned {
            response,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl Assistant for Canned {
    fn generate(&self, image: Option<&ImagePayload>, instruction: &str) -> Result<String, BoxedError> {
        self.calls.borrow_mut().push((
            image.map(|i| i.mime_type().to_string()),
            instruction.to_string(),
        ));
        Ok(self.response.to_string())
    }
}

struct Offline;

impl Assistant for Offline {
    fn generate(&self, _: Option<&ImagePayload>, _: &str) -> Result<String, BoxedError> {
        Err("service is unreachable".into())
    }
}

#[test]
fn image_to_vector() {
    let assistant = Canned::new("```xml\n<vector android:width=\"24dp\"/>\n```");
    let image = ImagePayload::new(PNG_HEADER.to_vec()).unwrap();

    let xml = generate_vector_drawable(&assistant, Some(&image), None).unwrap();
    assert_eq!(xml, "<vector android:width=\"24dp\"/>");

    let calls = assistant.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0.as_deref(), Some("image/png"));
    assert!(calls[0].1.contains("Android Vector Drawable"));

    // The result can be routed through the translator.
    let svg = vdsvg::translate(&xml).unwrap();
    assert!(svg.contains("viewBox=\"0 0 24 24\""));
}

#[test]
fn prompt_to_vector() {
    let assistant = Canned::new("<vector/>");
    let xml = generate_vector_drawable(&assistant, None, Some("  a house  ")).unwrap();
    assert_eq!(xml, "<vector/>");

    let calls = assistant.calls.borrow();
    assert_eq!(calls[0].0, None);
    assert!(calls[0].1.contains("'a house'"));
}

#[test]
fn no_input() {
    let assistant = Canned::new("<vector/>");
    let e = generate_vector_drawable(&assistant, None, Some("   ")).unwrap_err();
    assert!(matches!(e, AssistError::NoInput));
    assert!(assistant.calls.borrow().is_empty());
}

#[test]
fn assistant_failure() {
    let e = generate_vector_drawable(&Offline, None, Some("a star")).unwrap_err();
    assert!(matches!(e, AssistError::GenerationFailed(_)));
    assert_eq!(e.to_string(), "generation failed cause service is unreachable");
}
