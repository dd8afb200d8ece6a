//! API Gateway HTTP API (payload v2) adapter for the Lambda runtime.
//!
//! Every event is answered with a proxy response; no request shape makes the
//! invocation itself fail.

use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::{ApiGatewayProxyResponse, ApiGatewayV2httpRequest};
use base64::{Engine, engine::general_purpose::STANDARD};
use http::{HeaderMap, HeaderValue, header::CONTENT_TYPE};
use lambda_runtime::{Error, LambdaEvent, service_fn};

use std::sync::Arc;

use crate::{dto::NoteReply, service::NoteService};

/// Route key of the list function as configured on the HTTP API.
const LIST_ROUTE_KEY: &str = "GET /notes";

#[derive(Debug, PartialEq, Eq)]
enum Route {
    List,
    Get,
    Update,
}

impl Route {
    fn of(request: &ApiGatewayV2httpRequest) -> Self {
        match request.route_key.as_deref() {
            Some(LIST_ROUTE_KEY) => Self::List,
            Some(key) if key.starts_with("PUT ") => Self::Update,
            _ => Self::Get,
        }
    }
}

pub async fn run(service: Arc<NoteService>) -> Result<(), Error> {
    tracing::info!("Lambda handler starting");

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<ApiGatewayV2httpRequest>| {
            let service = service.clone();
            async move { handle_event(&service, event).await }
        },
    ))
    .await
}

pub async fn handle_event(
    service: &NoteService,
    event: LambdaEvent<ApiGatewayV2httpRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    tracing::debug!(request_id = %event.context.request_id, "Handling invocation");
    Ok(handle_request(service, &event.payload))
}

pub fn handle_request(
    service: &NoteService,
    request: &ApiGatewayV2httpRequest,
) -> ApiGatewayProxyResponse {
    let id = request.path_parameters.get("id").map(String::as_str);

    let reply = match Route::of(request) {
        Route::List => service.get_all_notes(),
        Route::Get => service.get_one_note(id),
        Route::Update => service.update_note(id, request_body(request).as_deref()),
    };

    into_proxy_response(reply)
}

fn request_body(request: &ApiGatewayV2httpRequest) -> Option<String> {
    let body = request.body.as_deref()?;

    if !request.is_base64_encoded {
        return Some(body.to_string());
    }

    match STANDARD.decode(body).map(String::from_utf8) {
        Ok(Ok(text)) => Some(text),
        Ok(Err(e)) => {
            tracing::warn!("Request body is not UTF-8: {e}");
            None
        }
        Err(e) => {
            tracing::warn!("Request body is not valid base64: {e}");
            None
        }
    }
}

fn into_proxy_response(reply: NoteReply) -> ApiGatewayProxyResponse {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    ApiGatewayProxyResponse {
        status_code: i64::from(reply.status.as_u16()),
        headers,
        body: Some(Body::Text(reply.body)),
        ..Default::default()
    }
}
