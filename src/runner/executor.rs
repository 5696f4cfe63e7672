use serde_json::Value;
use std::time::Instant;
use tracing::{info, warn};

use crate::Result;
use crate::config::Settings;
use crate::http::{Client, Request, Response};
use crate::runner::catalog::{ProbeKind, Section};
use crate::runner::reporter::ProbeReporter;
use crate::runner::types::{Outcome, ProbeFailure, ProbeResult, ProbeSummary};
use crate::session::Session;

/// 一次运行的选项
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// 跳过联系表单相关探针（它们会让后端真的发邮件）
    pub skip_contact: bool,
}

impl RunOptions {
    pub fn includes(&self, kind: ProbeKind) -> bool {
        !(self.skip_contact && kind.section() == Section::ContactForm)
    }
}

/// 管理员登录凭据
#[derive(Debug, Clone)]
pub(crate) struct Credentials {
    pub(crate) email: String,
    pub(crate) password: String,
}

/// 顺序执行所有探针并收集结果
pub struct ProbeRunner {
    pub(crate) session: Session,
    pub(crate) credentials: Credentials,
    reporter: ProbeReporter,
    results: Vec<ProbeResult>,
}

impl ProbeRunner {
    pub fn new(settings: &Settings, reporter: ProbeReporter) -> Result<Self> {
        let client = Client::new(settings.timeout)?;
        Ok(Self {
            session: Session::new(client, settings.base_url.clone()),
            credentials: Credentials {
                email: settings.admin_email.clone(),
                password: settings.admin_password.clone(),
            },
            reporter,
            results: Vec::new(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn results(&self) -> &[ProbeResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<ProbeResult> {
        self.results
    }

    /// 按目录顺序执行全部探针，打印报告并返回摘要
    pub async fn run_all(&mut self, options: &RunOptions) -> ProbeSummary {
        info!("Probing {}", self.session.base_url());
        self.reporter.print_header(self.session.base_url().as_str());

        let mut current = None;
        for kind in ProbeKind::ALL {
            if !options.includes(kind) {
                continue;
            }
            let section = kind.section();
            if current != Some(section) {
                self.reporter.print_section(section);
                current = Some(section);
            }
            self.run(kind).await;
        }

        let summary = ProbeSummary::from_results(&self.results);
        self.reporter.print_summary(&summary);
        info!(
            "Finished: {} passed, {} failed",
            summary.passed, summary.failed
        );
        summary
    }

    /// 执行单个探针，恰好追加一条记录，返回是否通过
    pub async fn run(&mut self, kind: ProbeKind) -> bool {
        let started = Instant::now();

        let outcome = if kind.requires_auth() && self.session.token().is_none() {
            Err(ProbeFailure::new("No auth token available"))
        } else {
            match kind {
                ProbeKind::HealthCheck => self.health_check().await,
                ProbeKind::RootEndpoint => self.root_endpoint().await,
                ProbeKind::LoginCorrect => self.admin_login_correct().await,
                ProbeKind::LoginIncorrect => self.admin_login_incorrect().await,
                ProbeKind::TokenVerification => self.token_verification().await,
                ProbeKind::ProtectedRouteWithoutAuth => self.protected_route_without_auth().await,
                ProbeKind::PersonalInfo => self.personal_info().await,
                ProbeKind::ProjectsAll => self.projects_all().await,
                ProbeKind::ProjectsAiFilter | ProbeKind::ProjectsWebFilter => {
                    self.projects_by_category(kind).await
                }
                ProbeKind::FeaturedProjects => self.featured_projects().await,
                ProbeKind::TechStack => self.tech_stack().await,
                ProbeKind::PortfolioStats => self.portfolio_stats().await,
                ProbeKind::ContactFormValid => self.contact_form_valid().await,
                ProbeKind::ContactFormInvalid => self.contact_form_invalid().await,
                ProbeKind::RateLimiting => self.rate_limiting().await,
                ProbeKind::AdminDashboard => self.admin_dashboard().await,
                ProbeKind::AdminProjects => self.admin_projects().await,
                ProbeKind::AdminPersonal => self.admin_personal().await,
                ProbeKind::AdminTechStack => self.admin_tech_stack().await,
                ProbeKind::AdminLogout => self.admin_logout().await,
                ProbeKind::NotFound => self.not_found().await,
            }
        };

        self.record(kind, outcome, started)
    }

    fn record(&mut self, kind: ProbeKind, outcome: Outcome, started: Instant) -> bool {
        let elapsed = started.elapsed();
        let result = match outcome {
            Ok(message) => ProbeResult::passed(kind.name(), message, elapsed),
            Err(failure) => ProbeResult::failed(kind.name(), failure, elapsed),
        };

        self.reporter.print_result(&result);
        let success = result.success;
        self.results.push(result);
        success
    }

    /// 发送请求，任何传输层错误都转换成探针失败
    pub(crate) async fn call(
        &self,
        request: Request,
        context: &str,
    ) -> std::result::Result<Response, ProbeFailure> {
        let url = request.full_url();
        self.session.send(request).await.map_err(|e| {
            warn!("{} {}: {}", context, url, e);
            ProbeFailure::transport(context, e)
        })
    }

    /// 按目录里的方法、路径和查询参数构造请求
    pub(crate) fn request(&self, kind: ProbeKind) -> std::result::Result<Request, ProbeFailure> {
        let url = self
            .session
            .url(kind.path())
            .map_err(|e| ProbeFailure::new(format!("Invalid probe URL: {}", e)))?;
        let request = Request::new(kind.method(), url);
        Ok(match kind.category() {
            Some(category) => request.with_query("category", category),
            None => request,
        })
    }
}

/// 校验状态码并解析 JSON body
pub(crate) fn expect_json(
    response: &Response,
    expected: u16,
) -> std::result::Result<Value, ProbeFailure> {
    if response.code() != expected {
        return Err(ProbeFailure::unexpected_status(expected, response));
    }
    response.json().map_err(|e| {
        ProbeFailure::with_details(
            format!("Invalid JSON response: {}", e),
            Value::String(response.body.clone()),
        )
    })
}
