// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::sync::Arc;

use actix_web::{error, web, HttpResponse, Result as ActixResult};
use qf_donation::{DonationPipeline, DonationRequest};
use qf_indexer::{ProjectLookup, ProjectReference};
use qf_wizard::{reduce, Action, Outcome, SessionState};
use tracing::warn;

use crate::{
    types::{FrameRequest, HealthResponse, LandingQuery},
    views::{self, FrameLinks},
};

/// Shared by every worker.
#[derive(Clone)]
pub struct FrameContext {
    pub pipeline: Arc<DonationPipeline>,
    pub links: FrameLinks,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handle_landing_query))
        .route("/", web::post().to(handle_landing_query))
        .route(
            "/frame/{network}/{round}/{project}",
            web::get().to(handle_landing),
        )
        .route(
            "/frame/{network}/{round}/{project}",
            web::post().to(handle_landing),
        )
        .route(
            "/what-is-qf/{network}/{round}/{project}",
            web::post().to(handle_what_is_qf),
        )
        .route(
            "/donate/{network}/{round}/{project}",
            web::post().to(handle_donate),
        )
        .route(
            "/donate/{network}/{round}/{project}/tx",
            web::post().to(handle_donate_tx),
        )
        .route("/health", web::get().to(handle_health_check))
        .route("/health", web::head().to(handle_health_check));
}

fn project_from_path(path: web::Path<(String, String, String)>) -> ActixResult<ProjectReference> {
    let (network, round, project) = path.into_inner();
    ProjectReference::from_parts(&network, &round, &project).map_err(error::ErrorBadRequest)
}

fn encode(state: &SessionState) -> ActixResult<String> {
    state.to_blob().map_err(error::ErrorInternalServerError)
}

fn frame_request(body: Option<web::Json<FrameRequest>>) -> FrameRequest {
    body.map(web::Json::into_inner).unwrap_or_default()
}

fn interaction(request: &FrameRequest) -> Option<Action> {
    Action::from_interaction(
        request.button_value.as_deref(),
        request.input_text.as_deref(),
    )
}

async fn render_landing(
    ctx: &FrameContext,
    project: Option<&ProjectReference>,
) -> ActixResult<HttpResponse> {
    let lookup = match project {
        Some(project) => ctx.pipeline.directory().resolve(project).await,
        None => ProjectLookup::empty(),
    };
    let state = encode(&SessionState::default())?;
    Ok(HttpResponse::Ok().json(views::landing(&ctx.links, project, &lookup, state)))
}

async fn handle_landing_query(
    ctx: web::Data<FrameContext>,
    query: web::Query<LandingQuery>,
) -> ActixResult<HttpResponse> {
    let project = query
        .url
        .as_deref()
        .and_then(|url| url.parse::<ProjectReference>().ok());
    render_landing(&ctx, project.as_ref()).await
}

async fn handle_landing(
    ctx: web::Data<FrameContext>,
    path: web::Path<(String, String, String)>,
) -> ActixResult<HttpResponse> {
    let project = project_from_path(path)?;
    render_landing(&ctx, Some(&project)).await
}

async fn handle_what_is_qf(
    path: web::Path<(String, String, String)>,
    body: Option<web::Json<FrameRequest>>,
) -> ActixResult<HttpResponse> {
    let project = project_from_path(path)?;
    let request = frame_request(body);
    let session = SessionState::from_blob_or_default(request.state.as_deref());

    let session = match interaction(&request) {
        Some(action @ (Action::QfNext | Action::QfPrev)) => reduce(&session, &action).state,
        _ => session,
    };

    let state = encode(&session)?;
    Ok(HttpResponse::Ok().json(views::explainer(
        &project,
        session.wizard.step,
        session.qf_slide,
        state,
    )))
}

async fn handle_donate(
    path: web::Path<(String, String, String)>,
    body: Option<web::Json<FrameRequest>>,
) -> ActixResult<HttpResponse> {
    let project = project_from_path(path)?;
    let request = frame_request(body);
    let session = SessionState::from_blob_or_default(request.state.as_deref());

    let (session, message) = match interaction(&request) {
        None => (session, None),
        Some(Action::Confirm) => (
            session,
            Some("Confirm sends the transaction from the confirm step".to_string()),
        ),
        Some(action) => {
            let transition = reduce(&session, &action);
            match transition.outcome {
                Outcome::Rejected(rejection) => (transition.state, Some(rejection.to_string())),
                Outcome::Applied | Outcome::Submit => (transition.state, None),
            }
        }
    };

    let state = encode(&session)?;
    let mut response = views::wizard(&project, &session.wizard, state);
    if let Some(message) = message {
        response = response.with_message(message);
    }
    Ok(HttpResponse::Ok().json(response))
}

async fn handle_donate_tx(
    ctx: web::Data<FrameContext>,
    path: web::Path<(String, String, String)>,
    body: Option<web::Json<FrameRequest>>,
) -> ActixResult<HttpResponse> {
    let project = project_from_path(path)?;
    let request = frame_request(body);
    let session = SessionState::from_blob_or_default(request.state.as_deref());

    let transition = reduce(&session, &Action::Confirm);
    if let Outcome::Rejected(rejection) = &transition.outcome {
        let state = encode(&session)?;
        return Ok(HttpResponse::BadRequest().json(
            views::wizard(&project, &session.wizard, state).with_message(rejection.to_string()),
        ));
    }

    let confirmed = transition.state;
    let donation = DonationRequest {
        asset: confirmed.wizard.donate_asset.clone(),
        amount: confirmed.wizard.donate_amount,
    };

    match ctx.pipeline.prepare(&project, &donation).await {
        Ok(prepared) => {
            let state = encode(&confirmed)?;
            Ok(HttpResponse::Ok().json(views::submitted(
                &project,
                &confirmed.wizard,
                prepared.transaction,
                state,
            )))
        }
        Err(e) => {
            warn!(kind = e.kind(), project = %project, "donation failed, returning to the confirm step");
            let rolled_back = reduce(&confirmed, &Action::SubmissionFailed).state;
            let state = encode(&rolled_back)?;
            Ok(HttpResponse::Ok().json(views::failure(&project, e.recovery(), state)))
        }
    }
}

async fn handle_health_check() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse { status: "healthy" }))
}
