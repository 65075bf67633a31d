//! BigFix REST and Server Automation API client.
//!
//! Every operation is one authenticated request. A non-200 status is reported
//! as `Ok(None)` (or an empty listing); only transport failures and
//! undecodable query results are errors.

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url, header};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::{ClientConfig, Credentials, SiteConfig};
use crate::error::{ApiError, ConfigError, Result};

use super::relevance::PlanQuery;
use super::types::{ListedPlan, QueryResponse};

/// Separator logged between plans while listing.
const LISTING_SEPARATOR: &str = "*********************";

/// BigFix Server Automation API client.
#[derive(Debug, Clone)]
pub struct BigFixClient {
    /// HTTP client.
    client: Client,
    /// Basic-auth credentials.
    credentials: Credentials,
    /// General REST API root.
    api_url: Url,
    /// Server Automation resource root.
    sa_url: Url,
    /// Site holding the plans.
    site: SiteConfig,
    /// Plan listing query.
    query: PlanQuery,
}

impl BigFixClient {
    /// Creates a new client from configuration and credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if a base URL is invalid or the HTTP client cannot be
    /// created.
    pub fn new(config: &ClientConfig, credentials: Credentials) -> Result<Self> {
        let mut builder = Client::builder().danger_accept_invalid_certs(!config.server.verify_tls);
        if let Some(secs) = config.server.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| ApiError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            credentials,
            api_url: parse_base_url(&config.server.api_url)?,
            sa_url: parse_base_url(&config.server.sa_url)?,
            site: config.site.clone(),
            query: PlanQuery::from_config(config),
        })
    }

    /// Returns the plan listing query this client runs.
    #[must_use]
    pub const fn query(&self) -> &PlanQuery {
        &self.query
    }

    /// Lists automation plans and fetches the execution template of each.
    ///
    /// Plans are located with a relevance query against the general REST API;
    /// every row found triggers one [`get_automation_plan_template`] call.
    /// A non-200 query response yields an empty listing.
    ///
    /// [`get_automation_plan_template`]: Self::get_automation_plan_template
    ///
    /// # Errors
    ///
    /// Returns an error if a request fails or the query result is malformed.
    pub async fn list_automation_plans(&self) -> Result<Vec<ListedPlan>> {
        let url = self.query_url(&self.query.to_relevance())?;
        let response = self.send(self.client.get(url)).await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Plan query returned {status}, no plans listed");
            return Ok(Vec::new());
        }

        let body = read_body(response).await?;
        let rows: QueryResponse = serde_json::from_str(&body).map_err(|e| {
            ApiError::invalid_response(format!("Failed to parse plan query result: {e}"))
        })?;

        let plans = rows.into_plans();
        let mut listed = Vec::with_capacity(plans.len());

        for plan in plans {
            info!("{}", plan.name);
            let template = self.get_automation_plan_template(plan.id).await?;
            info!("{LISTING_SEPARATOR}");
            listed.push(ListedPlan { plan, template });
        }

        Ok(listed)
    }

    /// Retrieves the plan execution template XML for a plan.
    ///
    /// Parameter and targeting information must be added to the template
    /// before it is passed to [`create_bf_action`](Self::create_bf_action).
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn get_automation_plan_template(&self, plan_id: u64) -> Result<Option<String>> {
        let url = self.plan_url(plan_id)?;
        let response = self.send(self.client.get(url)).await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("No template for plan {plan_id}: server returned {status}");
            return Ok(None);
        }

        let body = read_body(response).await?;
        info!("{body}");
        Ok(Some(body))
    }

    /// Executes a plan by posting a completed execution template.
    ///
    /// Returns the ID of the created plan action.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn create_bf_action(&self, plan_id: u64, xml_body: &str) -> Result<Option<String>> {
        let url = self.plan_url(plan_id)?;
        let request = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "application/xml")
            .body(xml_body.to_owned());
        let response = self.send(request).await?;

        let status = response.status();
        let body = read_body(response).await?;

        if status == StatusCode::OK {
            debug!("{body}");
            Ok(Some(body.trim().to_string()))
        } else {
            error!("There was an error sending the post request ({status})");
            debug!("{body}");
            Ok(None)
        }
    }

    /// Executes a plan: submits `completed_template`, or the server's own
    /// template for the plan when none is given, and returns the action ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::TemplateUnavailable`] if no template was given and
    /// the server returned none, or any error from the requests.
    pub async fn execute_plan(
        &self,
        plan_id: u64,
        completed_template: Option<String>,
    ) -> Result<Option<String>> {
        let xml = match completed_template {
            Some(xml) => xml,
            None => self
                .get_automation_plan_template(plan_id)
                .await?
                .ok_or(ApiError::TemplateUnavailable { plan_id })?,
        };

        let action_id = self.create_bf_action(plan_id, &xml).await?;
        info!("Action ID: {}", action_id.as_deref().unwrap_or("None"));
        Ok(action_id)
    }

    /// Retrieves the current state of a plan action and its step actions.
    ///
    /// Once the action has completed, stopped or expired the server no
    /// longer reports it; use the general REST API for its history.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn get_status_action(&self, action_id: &str) -> Result<Option<String>> {
        let url = self.sa_resource(&["planaction", action_id])?;
        let response = self.send(self.client.get(url)).await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("No status for action {action_id}: server returned {status}");
            return Ok(None);
        }

        let body = read_body(response).await?;
        info!("{body}");
        Ok(Some(body))
    }

    /// Authenticates and sends a request.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = request
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .build()
            .map_err(|e| ApiError::network(format!("Failed to build request: {e}")))?;

        debug!("{}", request.url());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ApiError::network(format!("Request failed: {e}")))?;

        Ok(response)
    }

    /// `{sa-root}/plan/{site type}/{site name}/{plan id}`
    fn plan_url(&self, plan_id: u64) -> Result<Url> {
        let plan_id = plan_id.to_string();
        self.sa_resource(&[
            "plan",
            self.site.site_type.as_str(),
            &self.site.name,
            &plan_id,
        ])
    }

    fn sa_resource(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.sa_url.clone();
        url.path_segments_mut()
            .map_err(|()| ConfigError::invalid_url(self.sa_url.as_str(), "cannot be a base URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `{api-root}/query?output=json&relevance={relevance}`
    fn query_url(&self, relevance: &str) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| ConfigError::invalid_url(self.api_url.as_str(), "cannot be a base URL"))?
            .pop_if_empty()
            .push("query");
        url.query_pairs_mut()
            .clear()
            .append_pair("output", "json")
            .append_pair("relevance", relevance);
        Ok(url)
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| ConfigError::invalid_url(raw, e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::invalid_url(raw, "cannot be a base URL").into());
    }
    Ok(url)
}

async fn read_body(response: Response) -> Result<String> {
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::network(format!("Failed to read response body: {e}")))?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteType;
    use wiremock::matchers::{body_string, header as header_is, method, path, path_regex, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEMPLATE: &str = "<PlanExecutionTemplate><Step id=\"1\"/></PlanExecutionTemplate>";

    fn config_for_server(server: &MockServer) -> ClientConfig {
        let mut config = ClientConfig::default();
        config.server.api_url = format!("{}/api", server.uri());
        config.server.sa_url = format!("{}/serverautomation", server.uri());
        config.site.name = String::from("Automation");
        config
    }

    fn client_for_server(server: &MockServer) -> BigFixClient {
        BigFixClient::new(&config_for_server(server), Credentials::new("alice", "secret"))
            .expect("client creation should succeed")
    }

    #[test]
    fn test_plan_url_encodes_site_name() {
        let client = BigFixClient::new(&ClientConfig::default(), Credentials::new("u", "p"))
            .expect("client creation should succeed");
        assert_eq!(
            client.plan_url(125_176).unwrap().as_str(),
            "https://saserver:8443/serverautomation/plan/custom/name%20custom%20site/125176"
        );
    }

    #[test]
    fn test_trailing_slash_base_url() {
        let mut config = ClientConfig::default();
        config.server.sa_url = String::from("https://saserver:8443/serverautomation/");
        config.site.site_type = SiteType::Master;
        config.site.name = String::from("ActionSite");
        let client = BigFixClient::new(&config, Credentials::new("u", "p")).unwrap();
        assert_eq!(
            client.plan_url(7).unwrap().as_str(),
            "https://saserver:8443/serverautomation/plan/master/ActionSite/7"
        );
        assert_eq!(
            client.sa_resource(&["planaction", "42"]).unwrap().as_str(),
            "https://saserver:8443/serverautomation/planaction/42"
        );
    }

    #[test]
    fn test_query_url_round_trips_relevance() {
        let client = BigFixClient::new(&ClientConfig::default(), Credentials::new("u", "p")).unwrap();
        let relevance = "names of bes fixlets whose (name of it = \"a&b+c 100%\")";
        let url = client.query_url(relevance).unwrap();

        assert_eq!(url.path(), "/api/query");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (String::from("output"), String::from("json")),
                (String::from("relevance"), relevance.to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = ClientConfig::default();
        config.server.api_url = String::from("mailto:admin@example.com");
        assert!(BigFixClient::new(&config, Credentials::new("u", "p")).is_err());
    }

    #[tokio::test]
    async fn test_list_fetches_one_template_per_row() {
        let server = MockServer::start().await;
        let client = client_for_server(&server);

        Mock::given(method("GET"))
            .and(path("/api/query"))
            .and(query_param("output", "json"))
            .and(query_param("relevance", client.query().to_relevance().as_str()))
            .and(header_is("authorization", "Basic YWxpY2U6c2VjcmV0"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"result":[[101,"Patch","Automation"],[102,"Reboot","Automation"],[103,"APITest","Automation"]]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        for id in ["101", "102"] {
            Mock::given(method("GET"))
                .and(path(format!("/serverautomation/plan/custom/Automation/{id}")))
                .respond_with(ResponseTemplate::new(200).set_body_string(TEMPLATE))
                .expect(1)
                .mount(&server)
                .await;
        }

        Mock::given(method("GET"))
            .and(path("/serverautomation/plan/custom/Automation/103"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let listed = client.list_automation_plans().await.expect("listing should succeed");

        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].plan.id, 101);
        assert_eq!(listed[1].plan.name, "Reboot");
        assert_eq!(listed[1].template.as_deref(), Some(TEMPLATE));
        assert!(listed[2].template.is_none());
    }

    #[tokio::test]
    async fn test_list_non_200_fetches_nothing() {
        let server = MockServer::start().await;
        let client = client_for_server(&server);

        Mock::given(method("GET"))
            .and(path("/api/query"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/serverautomation/plan/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(TEMPLATE))
            .expect(0)
            .mount(&server)
            .await;

        let listed = client.list_automation_plans().await.expect("listing should succeed");
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_list_malformed_result_is_error() {
        let server = MockServer::start().await;
        let client = client_for_server(&server);

        Mock::given(method("GET"))
            .and(path("/api/query"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<BESAPI/>"))
            .mount(&server)
            .await;

        let result = client.list_automation_plans().await;
        assert!(matches!(
            result,
            Err(crate::error::BigFixError::Api(ApiError::InvalidResponse { .. }))
        ));
    }

    #[tokio::test]
    async fn test_template_returns_exact_body() {
        let server = MockServer::start().await;
        let client = client_for_server(&server);
        let body = "  <PlanExecutionTemplate/>\n";

        Mock::given(method("GET"))
            .and(path("/serverautomation/plan/custom/Automation/125176"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let template = client.get_automation_plan_template(125_176).await.unwrap();
        assert_eq!(template.as_deref(), Some(body));
    }

    #[tokio::test]
    async fn test_template_404_is_absent() {
        let server = MockServer::start().await;
        let client = client_for_server(&server);

        Mock::given(method("GET"))
            .and(path("/serverautomation/plan/custom/Automation/1"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        assert!(client.get_automation_plan_template(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_template_with_spaced_site_name() {
        let server = MockServer::start().await;
        let mut config = config_for_server(&server);
        config.site.name = String::from("name custom site");
        let client = BigFixClient::new(&config, Credentials::new("alice", "secret")).unwrap();

        Mock::given(method("GET"))
            .and(path("/serverautomation/plan/custom/name%20custom%20site/125176"))
            .respond_with(ResponseTemplate::new(200).set_body_string(TEMPLATE))
            .expect(1)
            .mount(&server)
            .await;

        let template = client.get_automation_plan_template(125_176).await.unwrap();
        assert_eq!(template.as_deref(), Some(TEMPLATE));
    }

    #[tokio::test]
    async fn test_create_action_returns_trimmed_id() {
        let server = MockServer::start().await;
        let client = client_for_server(&server);

        Mock::given(method("POST"))
            .and(path("/serverautomation/plan/custom/Automation/125176"))
            .and(body_string(TEMPLATE))
            .and(header_is("authorization", "Basic YWxpY2U6c2VjcmV0"))
            .respond_with(ResponseTemplate::new(200).set_body_string(" 12345\n"))
            .expect(1)
            .mount(&server)
            .await;

        let action_id = client.create_bf_action(125_176, TEMPLATE).await.unwrap();
        assert_eq!(action_id.as_deref(), Some("12345"));
    }

    #[tokio::test]
    async fn test_create_action_with_minimal_plan() {
        let server = MockServer::start().await;
        let client = client_for_server(&server);

        Mock::given(method("POST"))
            .and(path("/serverautomation/plan/custom/Automation/5"))
            .and(body_string("<Plan/>"))
            .respond_with(ResponseTemplate::new(200).set_body_string("98765"))
            .mount(&server)
            .await;

        let action_id = client.create_bf_action(5, "<Plan/>").await.unwrap();
        assert_eq!(action_id.as_deref(), Some("98765"));
    }

    #[tokio::test]
    async fn test_create_action_500_is_absent() {
        let server = MockServer::start().await;
        let client = client_for_server(&server);

        Mock::given(method("POST"))
            .and(path("/serverautomation/plan/custom/Automation/5"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Missing targets"))
            .mount(&server)
            .await;

        assert!(client.create_bf_action(5, "<Plan/>").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_execute_plan_submits_fetched_template() {
        let server = MockServer::start().await;
        let client = client_for_server(&server);

        Mock::given(method("GET"))
            .and(path("/serverautomation/plan/custom/Automation/125176"))
            .respond_with(ResponseTemplate::new(200).set_body_string(TEMPLATE))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/serverautomation/plan/custom/Automation/125176"))
            .and(body_string(TEMPLATE))
            .respond_with(ResponseTemplate::new(200).set_body_string("98765\n"))
            .expect(1)
            .mount(&server)
            .await;

        let action_id = client.execute_plan(125_176, None).await.unwrap();
        assert_eq!(action_id.as_deref(), Some("98765"));

        let requests = server.received_requests().await.expect("recording enabled");
        let methods: Vec<String> = requests.iter().map(|r| r.method.to_string()).collect();
        assert_eq!(methods, vec!["GET", "POST"]);
    }

    #[tokio::test]
    async fn test_execute_plan_without_template_posts_nothing() {
        let server = MockServer::start().await;
        let client = client_for_server(&server);

        Mock::given(method("GET"))
            .and(path("/serverautomation/plan/custom/Automation/7"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("1"))
            .expect(0)
            .mount(&server)
            .await;

        let result = client.execute_plan(7, None).await;
        assert!(matches!(
            result,
            Err(crate::error::BigFixError::Api(ApiError::TemplateUnavailable { plan_id: 7 }))
        ));
    }

    #[tokio::test]
    async fn test_execute_plan_with_completed_template() {
        let server = MockServer::start().await;
        let client = client_for_server(&server);

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(TEMPLATE))
            .expect(0)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/serverautomation/plan/custom/Automation/7"))
            .and(body_string("<Plan/>"))
            .respond_with(ResponseTemplate::new(200).set_body_string("555"))
            .expect(1)
            .mount(&server)
            .await;

        let action_id = client
            .execute_plan(7, Some(String::from("<Plan/>")))
            .await
            .unwrap();
        assert_eq!(action_id.as_deref(), Some("555"));
    }

    #[tokio::test]
    async fn test_status_returns_raw_body() {
        let server = MockServer::start().await;
        let client = client_for_server(&server);
        let body = "<PlanAction>\n  <State>Open</State>\n</PlanAction>\n";

        Mock::given(method("GET"))
            .and(path("/serverautomation/planaction/98765"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let status = client.get_status_action("98765").await.unwrap();
        assert_eq!(status.as_deref(), Some(body));
    }

    #[tokio::test]
    async fn test_status_empty_body_accepted() {
        let server = MockServer::start().await;
        let client = client_for_server(&server);

        Mock::given(method("GET"))
            .and(path("/serverautomation/planaction/1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        assert_eq!(client.get_status_action("1").await.unwrap().as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_status_non_200_is_absent() {
        let server = MockServer::start().await;
        let client = client_for_server(&server);

        Mock::given(method("GET"))
            .and(path("/serverautomation/planaction/1"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        assert!(client.get_status_action("1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        drop(listener);

        let mut config = ClientConfig::default();
        config.server.sa_url = format!("http://127.0.0.1:{port}/serverautomation");

        let client = BigFixClient::new(&config, Credentials::new("u", "p")).unwrap();
        let result = client.get_status_action("1").await;
        assert!(matches!(
            result,
            Err(crate::error::BigFixError::Api(ApiError::NetworkError { .. }))
        ));
    }
}
