//! Signs a canned-policy URL with the fixture key, then creates a distribution against a mock
//! management API through the same client.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use time::{Duration, OffsetDateTime};
// self
use cloudfront_client::{
	api::{ApiEndpoint, ReqwestCloudFront},
	auth::Credential,
	distribution::{CacheBehavior, DistributionConfig, Origin},
	ext::RequestSigner,
	http::{ApiRequest, ReqwestHttpClient},
	reqwest::Client,
	sign::UrlSigner,
};

const CREATED_BODY: &str = "<Distribution><Id>EDFDVBD6EXAMPLE</Id><Status>InProgress</Status>\
<DomainName>d111111abcdef8.cloudfront.net</DomainName></Distribution>";

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let credential =
		Credential::from_pem(include_str!("../tests/fixtures/test_key.pem"), "APKAEXAMPLEKEYPAIR")?;
	let url_signer = UrlSigner::from_parts("https://d111111abcdef8.cloudfront.net", credential)?;
	let expires = OffsetDateTime::now_utc() + Duration::hours(1);

	println!("canned: {}", url_signer.canned_signed_url("/videos/intro.mp4", "", expires)?);
	println!("legacy: {}", url_signer.legacy_signed_url("/videos/intro.mp4", "", expires));

	let server = MockServer::start_async().await;
	let create_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/2014-11-06/distribution").header("x-demo-signature", "demo");
			then.status(201).header("content-type", "text/xml").body(CREATED_BODY);
		})
		.await;
	// Real deployments plug in an AWS request signer here.
	let request_signer: Arc<dyn RequestSigner> =
		Arc::new(|request: &mut ApiRequest| -> cloudfront_client::error::Result<()> {
			request.headers.push(("x-demo-signature".into(), "demo".into()));

			Ok(())
		});
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let client = ReqwestCloudFront::builder(http_client, request_signer)
		.endpoint(ApiEndpoint::builder().base_url(server.base_url()).build()?)
		.url_signer(url_signer)
		.build()?;
	let mut config = DistributionConfig {
		comment: "demo".into(),
		enabled: true,
		default_cache_behavior: CacheBehavior {
			target_origin_id: "assets".into(),
			viewer_protocol_policy: "https-only".into(),
			..Default::default()
		},
		..Default::default()
	};

	config.origins.push(Origin::s3("assets", "assets.s3.amazonaws.com", ""));

	let created = client.create_distribution(config).await?;

	create_mock.assert_async().await;
	println!("created {} ({}) at {}", created.id, created.status, created.domain_name);

	Ok(())
}
