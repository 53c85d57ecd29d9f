// Tests for Template records and form drafts

use super::*;

#[test]
fn test_draft_validation() {
    let draft = TemplateDraft {
        name: "  Retorno  ".to_string(),
        trigger: " ret ".to_string(),
        body: "  corpo  ".to_string(),
    };
    let template = draft.validate().unwrap();
    assert_eq!(template, Template::new("Retorno", "ret", "  corpo  "));

    let blank_trigger = TemplateDraft {
        name: "Nome".to_string(),
        trigger: "   ".to_string(),
        body: String::new(),
    };
    assert_eq!(blank_trigger.validate(), Err(SnippetError::EmptyField("trigger")));
    assert_eq!(TemplateDraft::default().validate(), Err(SnippetError::EmptyField("name")));
}

#[test]
fn test_template_json_uses_content_key() {
    let json = r#"{"name":"n","trigger":"t","content":"c"}"#;
    let template: Template = serde_json::from_str(json).unwrap();
    assert_eq!(template.body, "c");
    assert_eq!(serde_json::to_string(&template).unwrap(), json);
}
