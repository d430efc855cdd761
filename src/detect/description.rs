use crate::constants::{GENERIC_DEVICE_NAME, UPNP_DEVICE_NAMESPACE};
use crate::net::probe::http_get;
use tracing::debug;

const FRIENDLY_NAME_OPEN: &str = "<friendlyName>";
const FRIENDLY_NAME_CLOSE: &str = "</friendlyName>";

/// Resolves a UPnP descriptor URL into a human-readable device name
pub struct DescriptionFetcher {
    client: reqwest::Client,
}

impl DescriptionFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch the descriptor and extract a name. Always returns a label; a
    /// failed fetch only means the server header and generic fallbacks apply.
    pub async fn fetch_name(&self, location: &str, server: Option<&str>) -> String {
        match http_get(&self.client, location).await {
            Some(reply) if reply.is_ok() => name_from_body(&reply.body, server),
            Some(reply) => {
                debug!(location, status = reply.status, "descriptor fetch returned non-200");
                name_from_server(server).unwrap_or_else(|| GENERIC_DEVICE_NAME.to_string())
            }
            None => {
                debug!(location, "descriptor fetch failed");
                name_from_server(server).unwrap_or_else(|| GENERIC_DEVICE_NAME.to_string())
            }
        }
    }
}

/// Name from a descriptor body: XML first, then a raw marker search, then
/// the server header, then the generic label.
pub fn name_from_body(body: &str, server: Option<&str>) -> String {
    friendly_name_from_xml(body)
        .or_else(|| friendly_name_from_text(body))
        .or_else(|| name_from_server(server))
        .unwrap_or_else(|| GENERIC_DEVICE_NAME.to_string())
}

fn friendly_name_from_xml(body: &str) -> Option<String> {
    let document = match roxmltree::Document::parse(body) {
        Ok(document) => document,
        Err(e) => {
            debug!(error = %e, "descriptor is not well-formed XML");
            return None;
        }
    };

    document
        .descendants()
        .filter(|node| node.has_tag_name("friendlyName"))
        .filter(|node| matches!(node.tag_name().namespace(), None | Some(UPNP_DEVICE_NAMESPACE)))
        .filter_map(|node| node.text())
        .map(str::trim)
        .find(|name| !name.is_empty())
        .map(str::to_string)
}

fn friendly_name_from_text(body: &str) -> Option<String> {
    let start = body.find(FRIENDLY_NAME_OPEN)? + FRIENDLY_NAME_OPEN.len();
    let end = start + body[start..].find(FRIENDLY_NAME_CLOSE)?;
    let name = body[start..end].trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Vendor guess from an SSDP SERVER header
pub fn name_from_server(server: Option<&str>) -> Option<String> {
    let server = server?.to_lowercase();
    if server.contains("android") {
        Some("Android TV".to_string())
    } else if server.contains("linux") && server.contains("upnp") {
        Some("Smart TV (Linux)".to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_friendly_name_in_foreign_namespace() {
        let body = r#"<root xmlns="urn:example:other"><friendlyName>Wrong</friendlyName></root>"#;
        assert_eq!(friendly_name_from_xml(body), None);
    }

    #[test]
    fn blank_friendly_name_is_not_a_name() {
        assert_eq!(friendly_name_from_text("<friendlyName>  </friendlyName>"), None);
        assert_eq!(friendly_name_from_text("<friendlyName>Open only"), None);
    }

    #[test]
    fn server_header_is_case_insensitive() {
        assert_eq!(
            name_from_server(Some("Linux/4.9 UPnP/1.0 Cling/2.0")).as_deref(),
            Some("Smart TV (Linux)")
        );
        assert_eq!(name_from_server(Some("ANDROID/11")).as_deref(), Some("Android TV"));
        assert_eq!(name_from_server(Some("Linux/5.4 lighttpd")), None);
        assert_eq!(name_from_server(None), None);
    }
}
