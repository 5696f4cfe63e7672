use std::fmt;

use crate::http::Method;

/// 报告中的分组
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Connectivity,
    Authentication,
    PublicApi,
    ContactForm,
    Admin,
    ErrorHandling,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Connectivity => "🔍 BASIC CONNECTIVITY TESTS",
            Section::Authentication => "🔐 AUTHENTICATION TESTS",
            Section::PublicApi => "🌐 PUBLIC API TESTS",
            Section::ContactForm => "📧 CONTACT FORM TESTS",
            Section::Admin => "👨‍💼 ADMIN PROTECTED ENDPOINT TESTS",
            Section::ErrorHandling => "⚠️ ERROR HANDLING TESTS",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Section::Connectivity => "connectivity",
            Section::Authentication => "auth",
            Section::PublicApi => "public",
            Section::ContactForm => "contact",
            Section::Admin => "admin",
            Section::ErrorHandling => "errors",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// 所有探针，声明顺序即执行顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    HealthCheck,
    RootEndpoint,
    LoginCorrect,
    LoginIncorrect,
    TokenVerification,
    ProtectedRouteWithoutAuth,
    PersonalInfo,
    ProjectsAll,
    ProjectsAiFilter,
    ProjectsWebFilter,
    FeaturedProjects,
    TechStack,
    PortfolioStats,
    ContactFormValid,
    ContactFormInvalid,
    RateLimiting,
    AdminDashboard,
    AdminProjects,
    AdminPersonal,
    AdminTechStack,
    AdminLogout,
    NotFound,
}

impl ProbeKind {
    pub const ALL: [ProbeKind; 22] = [
        ProbeKind::HealthCheck,
        ProbeKind::RootEndpoint,
        ProbeKind::LoginCorrect,
        ProbeKind::LoginIncorrect,
        ProbeKind::TokenVerification,
        ProbeKind::ProtectedRouteWithoutAuth,
        ProbeKind::PersonalInfo,
        ProbeKind::ProjectsAll,
        ProbeKind::ProjectsAiFilter,
        ProbeKind::ProjectsWebFilter,
        ProbeKind::FeaturedProjects,
        ProbeKind::TechStack,
        ProbeKind::PortfolioStats,
        ProbeKind::ContactFormValid,
        ProbeKind::ContactFormInvalid,
        ProbeKind::RateLimiting,
        ProbeKind::AdminDashboard,
        ProbeKind::AdminProjects,
        ProbeKind::AdminPersonal,
        ProbeKind::AdminTechStack,
        ProbeKind::AdminLogout,
        ProbeKind::NotFound,
    ];

    /// 报告里显示的名称
    pub fn name(&self) -> &'static str {
        match self {
            ProbeKind::HealthCheck => "Health Check",
            ProbeKind::RootEndpoint => "Root Endpoint",
            ProbeKind::LoginCorrect => "Admin Login (Correct)",
            ProbeKind::LoginIncorrect => "Admin Login (Incorrect)",
            ProbeKind::TokenVerification => "JWT Verification",
            ProbeKind::ProtectedRouteWithoutAuth => "Protected Route Auth",
            ProbeKind::PersonalInfo => "Personal Info API",
            ProbeKind::ProjectsAll => "Projects API (All)",
            ProbeKind::ProjectsAiFilter => "Projects API (AI Filter)",
            ProbeKind::ProjectsWebFilter => "Projects API (Web Filter)",
            ProbeKind::FeaturedProjects => "Featured Projects API",
            ProbeKind::TechStack => "Tech Stack API",
            ProbeKind::PortfolioStats => "Portfolio Stats API",
            ProbeKind::ContactFormValid => "Contact Form (Valid)",
            ProbeKind::ContactFormInvalid => "Contact Form (Invalid)",
            ProbeKind::RateLimiting => "Rate Limiting",
            ProbeKind::AdminDashboard => "Admin Dashboard",
            ProbeKind::AdminProjects => "Admin Projects",
            ProbeKind::AdminPersonal => "Admin Personal",
            ProbeKind::AdminTechStack => "Admin Tech Stack",
            ProbeKind::AdminLogout => "Admin Logout",
            ProbeKind::NotFound => "404 Error Handling",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            ProbeKind::HealthCheck | ProbeKind::RootEndpoint => Section::Connectivity,
            ProbeKind::LoginCorrect
            | ProbeKind::LoginIncorrect
            | ProbeKind::TokenVerification
            | ProbeKind::ProtectedRouteWithoutAuth => Section::Authentication,
            ProbeKind::PersonalInfo
            | ProbeKind::ProjectsAll
            | ProbeKind::ProjectsAiFilter
            | ProbeKind::ProjectsWebFilter
            | ProbeKind::FeaturedProjects
            | ProbeKind::TechStack
            | ProbeKind::PortfolioStats => Section::PublicApi,
            ProbeKind::ContactFormValid
            | ProbeKind::ContactFormInvalid
            | ProbeKind::RateLimiting => Section::ContactForm,
            ProbeKind::AdminDashboard
            | ProbeKind::AdminProjects
            | ProbeKind::AdminPersonal
            | ProbeKind::AdminTechStack
            | ProbeKind::AdminLogout => Section::Admin,
            ProbeKind::NotFound => Section::ErrorHandling,
        }
    }

    pub fn method(&self) -> Method {
        match self {
            ProbeKind::LoginCorrect
            | ProbeKind::LoginIncorrect
            | ProbeKind::TokenVerification
            | ProbeKind::ContactFormValid
            | ProbeKind::ContactFormInvalid
            | ProbeKind::RateLimiting
            | ProbeKind::AdminLogout => Method::Post,
            _ => Method::Get,
        }
    }

    /// 相对于 base URL 的路径，`""` 为 API 根
    pub fn path(&self) -> &'static str {
        match self {
            ProbeKind::HealthCheck => "/health",
            ProbeKind::RootEndpoint => "",
            ProbeKind::LoginCorrect | ProbeKind::LoginIncorrect => "/auth/login",
            ProbeKind::TokenVerification => "/auth/verify",
            ProbeKind::ProtectedRouteWithoutAuth | ProbeKind::AdminDashboard => "/admin/dashboard",
            ProbeKind::PersonalInfo => "/portfolio/personal",
            ProbeKind::ProjectsAll
            | ProbeKind::ProjectsAiFilter
            | ProbeKind::ProjectsWebFilter => "/portfolio/projects",
            ProbeKind::FeaturedProjects => "/portfolio/projects/featured",
            ProbeKind::TechStack => "/portfolio/tech-stack",
            ProbeKind::PortfolioStats => "/portfolio/stats",
            ProbeKind::ContactFormValid
            | ProbeKind::ContactFormInvalid
            | ProbeKind::RateLimiting => "/contact",
            ProbeKind::AdminProjects => "/admin/projects",
            ProbeKind::AdminPersonal => "/admin/personal",
            ProbeKind::AdminTechStack => "/admin/tech-stack",
            ProbeKind::AdminLogout => "/auth/logout",
            ProbeKind::NotFound => "/nonexistent-endpoint",
        }
    }

    /// 按分类过滤的探针携带的 `category` 查询值
    pub fn category(&self) -> Option<&'static str> {
        match self {
            ProbeKind::ProjectsAiFilter => Some("AI"),
            ProbeKind::ProjectsWebFilter => Some("Web"),
            _ => None,
        }
    }

    /// 路径加查询串，用于列表展示
    pub fn route(&self) -> String {
        let path = if self.path().is_empty() { "/" } else { self.path() };
        match self.category() {
            Some(category) => format!("{}?category={}", path, category),
            None => path.to_string(),
        }
    }

    /// 是否需要登录后的 bearer token
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            ProbeKind::TokenVerification
                | ProbeKind::AdminDashboard
                | ProbeKind::AdminProjects
                | ProbeKind::AdminPersonal
                | ProbeKind::AdminTechStack
                | ProbeKind::AdminLogout
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = ProbeKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), ProbeKind::ALL.len());
    }

    #[test]
    fn test_sections_are_contiguous() {
        // 同一分组的探针在执行顺序里必须相邻，报告才只打印一次标题
        let mut seen = Vec::new();
        for kind in ProbeKind::ALL {
            let section = kind.section();
            if seen.last() != Some(&section) {
                assert!(!seen.contains(&section), "{} split apart", section);
                seen.push(section);
            }
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_login_precedes_authenticated_probes() {
        let login = ProbeKind::ALL
            .iter()
            .position(|k| *k == ProbeKind::LoginCorrect)
            .unwrap();
        for (index, kind) in ProbeKind::ALL.iter().enumerate() {
            if kind.requires_auth() {
                assert!(index > login, "{} runs before login", kind.name());
            }
        }
    }

    #[test]
    fn test_route_includes_category() {
        assert_eq!(ProbeKind::ProjectsAll.route(), "/portfolio/projects");
        assert_eq!(
            ProbeKind::ProjectsAiFilter.route(),
            "/portfolio/projects?category=AI"
        );
        assert_eq!(ProbeKind::RootEndpoint.route(), "/");
    }

    #[test]
    fn test_logout_is_last_authenticated_probe() {
        let last_auth = ProbeKind::ALL
            .iter()
            .rposition(|k| k.requires_auth())
            .unwrap();
        assert_eq!(ProbeKind::ALL[last_auth], ProbeKind::AdminLogout);
    }
}
