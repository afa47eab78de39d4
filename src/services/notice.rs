//! 邮件内容渲染（只负责内容，发送由外部服务完成）
//!
//! - 合作提案邮件：附带问卷链接
//! - 链接通知邮件：附带追踪链接
//! - 已保存的邮件模板：按变量替换

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::NoticeConfig;
use crate::errors::{OutreachError, Result};
use crate::outreach::EmailTemplate;
use crate::storage::SurveySubmission;

const PROPOSAL_SUBJECT_TEMPLATE: &str = "[제휴 제안] {name}님, 해외 여행 유심 서비스 제안드립니다";

const PROPOSAL_BODY_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>제휴 제안</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2 style="color: #2563eb;">안녕하세요 {name}님,</h2>
    <p>블로그 "<strong>{blog_name}</strong>"을 통해 귀하를 알게 되었습니다.</p>
    <p>귀하의 훌륭한 콘텐츠를 보고, 해외 여행 유심 서비스 제휴를 제안드립니다.</p>
    <div style="background-color: #f8fafc; padding: 20px; border-radius: 8px; margin: 20px 0;">
      <h3 style="color: #2563eb; margin-top: 0;">제휴 혜택</h3>
      <ul>
        <li>무료 해외 여행 유심 제공</li>
        <li>제휴 수수료 지급</li>
        <li>마케팅 지원</li>
      </ul>
    </div>
    <p>자세한 내용은 첨부 파일을 참고해 주세요.</p>
    <div style="text-align: center; margin: 30px 0;">
      <a href="{survey_url}" style="background-color: #2563eb; color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px; display: inline-block;">설문 참여하기</a>
    </div>
    <p>문의사항이 있으시면 언제든지 연락주세요.</p>
    <p>감사합니다.</p>
    <hr style="margin: 30px 0; border: none; border-top: 1px solid #e5e7eb;">
    <div style="font-size: 12px; color: #6b7280;">
      <p><strong>{company_info}</strong></p>
      <p>본 메일은 제안 안내 메일이며, 수신거부를 원하시면 <a href="{unsubscribe_url}">여기를 클릭</a>하십시오.</p>
    </div>
  </div>
</body>
</html>
"#;

const LINK_SUBJECT_TEMPLATE: &str = "[링크 안내] {name}님, 마케팅 링크를 안내드립니다";

const LINK_BODY_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>링크 안내</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2 style="color: #2563eb;">안녕하세요 {name}님,</h2>
    <p>상품 발송이 완료되었습니다. 아래 링크를 통해 마케팅 활동을 진행해 주세요.</p>
    <div style="text-align: center; margin: 30px 0;">
      <a href="{tracking_link}" style="background-color: #2563eb; color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px; display: inline-block;">마케팅 링크</a>
    </div>
    <div style="background-color: #f8fafc; padding: 20px; border-radius: 8px; margin: 20px 0;">
      <h3 style="color: #2563eb; margin-top: 0;">활동 가이드</h3>
      <ul>
        <li>위 링크를 통해 상품을 소개해 주세요</li>
        <li>사용 후기를 블로그에 포스팅해 주세요</li>
        <li>광고성 표기 문구를 포함해 주세요</li>
      </ul>
    </div>
    <p>문의사항이 있으시면 언제든지 연락주세요.</p>
    <p>감사합니다.</p>
    <hr style="margin: 30px 0; border: none; border-top: 1px solid #e5e7eb;">
    <div style="font-size: 12px; color: #6b7280;">
      <p><strong>{company_info}</strong></p>
      <p>본 메일은 링크 안내 메일이며, 수신거부를 원하시면 <a href="{unsubscribe_url}">여기를 클릭</a>하십시오.</p>
    </div>
  </div>
</body>
</html>
"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedNotice {
    pub subject: String,
    pub html: String,
}

/// Replaces every `{key}` with its value; unknown placeholders stay as-is.
pub fn replace_placeholders(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in vars {
        out = out.replace(&format!("{{{}}}", key), value);
    }
    out
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Substitutes template variables; values in the HTML body are escaped,
/// the subject stays plain text.
pub fn render_template(
    template: &EmailTemplate,
    variables: &HashMap<String, String>,
) -> RenderedNotice {
    let escaped: Vec<(&str, String)> = variables
        .iter()
        .map(|(k, v)| (k.as_str(), escape_html(v)))
        .collect();
    let body_vars: Vec<(&str, &str)> = escaped.iter().map(|(k, v)| (*k, v.as_str())).collect();
    let subject_vars: Vec<(&str, &str)> = variables
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    RenderedNotice {
        subject: replace_placeholders(&template.subject, &subject_vars),
        html: replace_placeholders(&template.body, &body_vars),
    }
}

pub struct NoticeRenderer {
    company_info: String,
    unsubscribe_url: String,
    survey_url: String,
}

impl NoticeRenderer {
    pub fn new(config: &NoticeConfig) -> Self {
        Self {
            company_info: config.company_info.clone(),
            unsubscribe_url: config.unsubscribe_url.clone(),
            survey_url: config.survey_url.clone(),
        }
    }

    /// Partnership proposal mail.
    ///
    /// `survey_url` falls back to the configured one; having neither is a
    /// `Validation` error.
    pub fn render_proposal_notice(
        &self,
        name: &str,
        blog_name: &str,
        survey_url: Option<&str>,
    ) -> Result<RenderedNotice> {
        let survey_url = survey_url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(self.survey_url.as_str());
        if survey_url.is_empty() {
            return Err(OutreachError::validation(
                "surveyUrl is required (no notice.survey_url configured)",
            ));
        }

        let name_html = escape_html(name);
        let blog = escape_html(blog_name);
        let survey = escape_html(survey_url);
        let company = escape_html(&self.company_info);
        let unsubscribe = escape_html(&self.unsubscribe_url);
        let vars = [
            ("name", name_html.as_str()),
            ("blog_name", blog.as_str()),
            ("survey_url", survey.as_str()),
            ("company_info", company.as_str()),
            ("unsubscribe_url", unsubscribe.as_str()),
        ];

        Ok(RenderedNotice {
            subject: replace_placeholders(PROPOSAL_SUBJECT_TEMPLATE, &[("name", name)]),
            html: replace_placeholders(PROPOSAL_BODY_TEMPLATE, &vars),
        })
    }

    /// Link guide mail for a stored submission.
    pub fn render_link_notice(&self, submission: &SurveySubmission) -> Result<RenderedNotice> {
        let link = submission.tracking_link.as_deref().ok_or_else(|| {
            OutreachError::validation(format!(
                "Submission {} has no tracking link",
                submission.id
            ))
        })?;

        let name = escape_html(&submission.name);
        let link = escape_html(link);
        let company = escape_html(&self.company_info);
        let unsubscribe = escape_html(&self.unsubscribe_url);
        let vars = [
            ("name", name.as_str()),
            ("tracking_link", link.as_str()),
            ("company_info", company.as_str()),
            ("unsubscribe_url", unsubscribe.as_str()),
        ];

        Ok(RenderedNotice {
            // 主题是纯文本，不转义
            subject: replace_placeholders(
                LINK_SUBJECT_TEMPLATE,
                &[("name", submission.name.as_str())],
            ),
            html: replace_placeholders(LINK_BODY_TEMPLATE, &vars),
        })
    }
}
