use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::Serialize;

use super::error::BoardsError;
use super::session::ClientSession;

/// An authenticated request, fully described but not yet sent.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Status and raw body of a backend response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// Each endpoint has its own success statuses. Anything else, including
    /// the 203 sign-in page served for a bad token, is a failure.
    pub fn status_in(&self, accepted: &[u16]) -> bool {
        accepted.contains(&self.status)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    session: &'a ClientSession,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(session: &'a ClientSession) -> Self {
        Self { session }
    }

    pub fn build(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<ApiRequest, BoardsError> {
        if path.chars().any(|c| c.is_ascii_control() || c == '#') {
            return Err(BoardsError::Construction(format!(
                "path contains invalid characters: {path:?}"
            )));
        }

        let raw = format!(
            "{}/{}",
            self.session.base_url().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let url = Url::parse(&raw)
            .map_err(|e| BoardsError::Construction(format!("{raw}: {e}")))?;

        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(self.session.authorization())
            .map_err(|e| BoardsError::Construction(format!("authorization header: {e}")))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        Ok(ApiRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Serialize `body` as JSON and build a request carrying it.
    pub fn build_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ApiRequest, BoardsError> {
        let json = serde_json::to_string(body)
            .map_err(|e| BoardsError::Construction(format!("request body: {e}")))?;
        self.build(method, path, Some(json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boards::session::DEFAULT_HOST;

    fn session() -> ClientSession {
        ClientSession::new(DEFAULT_HOST, "contoso".into(), "Fabrikam".into(), "pat")
    }

    #[test]
    fn path_is_appended_once_to_base() {
        let s = session();
        let req = RequestBuilder::new(&s)
            .build(Method::GET, "wit/workitems?ids=1,2&api-version=7.1", None)
            .unwrap();
        assert_eq!(
            req.url.as_str(),
            "https://dev.azure.com/contoso/Fabrikam/_apis/wit/workitems?ids=1,2&api-version=7.1"
        );
    }

    #[test]
    fn leading_slash_does_not_double_up() {
        let s = session();
        let req = RequestBuilder::new(&s)
            .build(Method::GET, "/wit/wiql", None)
            .unwrap();
        assert_eq!(
            req.url.path(),
            "/contoso/Fabrikam/_apis/wit/wiql"
        );
    }

    #[test]
    fn escaped_project_name_is_not_reencoded() {
        let s = ClientSession::new(DEFAULT_HOST, "org".into(), "My%20Project".into(), "pat");
        let req = RequestBuilder::new(&s)
            .build(Method::GET, "wit/wiql", None)
            .unwrap();
        assert_eq!(req.url.path(), "/org/My%20Project/_apis/wit/wiql");
    }

    #[test]
    fn create_path_keeps_dollar_type_segment() {
        let s = session();
        let req = RequestBuilder::new(&s)
            .build(Method::POST, "wit/workitems/$Bug?api-version=7.1", Some("[]".into()))
            .unwrap();
        assert_eq!(req.url.path(), "/contoso/Fabrikam/_apis/wit/workitems/$Bug");
    }

    #[test]
    fn content_type_only_with_body() {
        let s = session();
        let builder = RequestBuilder::new(&s);

        let get = builder.build(Method::GET, "wit/workitems", None).unwrap();
        assert!(get.headers.get(CONTENT_TYPE).is_none());
        assert_eq!(get.headers[AUTHORIZATION], s.authorization());

        let post = builder
            .build_json(Method::POST, "wit/wiql", &serde_json::json!({"query": "x"}))
            .unwrap();
        assert_eq!(post.headers[CONTENT_TYPE], "application/json");
        assert_eq!(post.body.as_deref(), Some(r#"{"query":"x"}"#));
    }

    #[test]
    fn control_characters_are_rejected() {
        let s = session();
        let err = RequestBuilder::new(&s)
            .build(Method::GET, "wit/workitems?ids=1\n2", None)
            .unwrap_err();
        assert!(matches!(err, BoardsError::Construction(_)));
    }

    #[test]
    fn fragment_marker_is_rejected() {
        let s = session();
        let err = RequestBuilder::new(&s)
            .build(Method::GET, "wit/workitems?ids=1#2&api-version=7.1", None)
            .unwrap_err();
        assert!(matches!(err, BoardsError::Construction(_)));
    }

    #[test]
    fn unparseable_host_is_rejected() {
        let s = ClientSession::new("not a url", "org".into(), "proj".into(), "pat");
        let err = RequestBuilder::new(&s)
            .build(Method::GET, "wit/wiql", None)
            .unwrap_err();
        assert!(matches!(err, BoardsError::Construction(_)));
    }
}
