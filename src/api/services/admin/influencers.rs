//! Admin API 博主名册端点

use actix_web::{HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::services::{InfluencerService, NewInfluencer, NoticeRenderer};

use super::helpers::{api_result, created_response, error_from_outreach};
use super::types::{ListInfluencersQuery, ProposalQuery};

/// GET /influencers?limit=50
pub async fn list_influencers(
    query: web::Query<ListInfluencersQuery>,
    service: web::Data<Arc<InfluencerService>>,
) -> ActixResult<HttpResponse> {
    Ok(api_result(service.list(query.limit).await))
}

/// POST /influencers
pub async fn create_influencer(
    body: web::Json<NewInfluencer>,
    service: web::Data<Arc<InfluencerService>>,
) -> ActixResult<HttpResponse> {
    Ok(match service.create(body.into_inner()).await {
        Ok(influencer) => created_response(influencer),
        Err(e) => error_from_outreach(&e),
    })
}

/// GET /influencers/{id}
pub async fn get_influencer(
    path: web::Path<String>,
    service: web::Data<Arc<InfluencerService>>,
) -> ActixResult<HttpResponse> {
    Ok(api_result(service.get(&path.into_inner()).await))
}

/// GET /influencers/{id}/proposal?blogName=..&surveyUrl=..
///
/// 博客名默认为博客地址，问卷链接默认取配置
pub async fn get_proposal_notice(
    path: web::Path<String>,
    query: web::Query<ProposalQuery>,
    service: web::Data<Arc<InfluencerService>>,
    renderer: web::Data<Arc<NoticeRenderer>>,
) -> ActixResult<HttpResponse> {
    let result = match service.get(&path.into_inner()).await {
        Ok(influencer) => {
            let name = if influencer.name.is_empty() {
                influencer.email.as_str()
            } else {
                influencer.name.as_str()
            };
            let blog_name = query
                .blog_name
                .as_deref()
                .unwrap_or(influencer.blog_url.as_str());
            renderer.render_proposal_notice(name, blog_name, query.survey_url.as_deref())
        }
        Err(e) => Err(e),
    };
    Ok(api_result(result))
}
