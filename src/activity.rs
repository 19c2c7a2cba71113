/// Extract the object id from a serialized `Create` activity.
///
/// Returns `Some` only when the document parses as a JSON object, its `type`
/// is `"Create"`, and `object.id` is a non-empty string. Everything else is
/// normal non-matching traffic (Announce, Update, malformed payloads) and
/// yields `None` without an error.
pub fn create_object_id(raw: &str) -> Option<String> {
    let document: serde_json::Value = serde_json::from_str(raw).ok()?;

    if document.get("type")?.as_str()? != "Create" {
        return None;
    }

    let id = document.get("object")?.get("id")?.as_str()?;
    if id.is_empty() {
        return None;
    }

    Some(id.to_string())
}
