//! URL parsing and identity wrappers for project boards.

use url::Url;

use super::error::TriageError;

/// Kind of account that owns a project board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKind {
    /// Project owned by an organisation (`/orgs/<owner>/...`).
    Organization,
    /// Project owned by a user account (`/users/<owner>/...`).
    User,
}

impl OwnerKind {
    /// Resolves an owner kind token.
    ///
    /// Accepts the URL path segments (`orgs`, `users`) as well as the
    /// GraphQL root names (`organization`, `user`), ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::UnsupportedOwnerKind`] for any other token.
    pub fn from_token(token: &str) -> Result<Self, TriageError> {
        match token.to_ascii_lowercase().as_str() {
            "orgs" | "organization" => Ok(Self::Organization),
            "users" | "user" => Ok(Self::User),
            _ => Err(TriageError::UnsupportedOwnerKind {
                kind: token.to_owned(),
            }),
        }
    }

    /// GraphQL root field used to look up projects for this owner kind.
    #[must_use]
    pub const fn query_root(self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::User => "user",
        }
    }
}

/// Maps an owner kind token straight to its GraphQL query root.
///
/// # Errors
///
/// Returns [`TriageError::UnsupportedOwnerKind`] when the token is neither an
/// organisation nor a user.
pub fn resolve_query_root(token: &str) -> Result<&'static str, TriageError> {
    OwnerKind::from_token(token).map(OwnerKind::query_root)
}

/// Project owner login wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOwner(String);

impl ProjectOwner {
    pub(crate) fn new(value: &str) -> Result<Self, TriageError> {
        if value.is_empty() {
            return Err(TriageError::InvalidProjectPath);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner login.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Project number, always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectNumber(u64);

impl ProjectNumber {
    pub(crate) const fn new(value: u64) -> Result<Self, TriageError> {
        if value == 0 {
            return Err(TriageError::InvalidProjectNumber);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, TriageError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TriageError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Derives the API base URL from the project host.
///
/// GitHub Enterprise serves GraphQL from `/api/graphql`, so the base is the
/// `/api` prefix rather than the REST `/api/v3` prefix.
fn derive_api_base(parsed: &Url) -> Result<Url, TriageError> {
    let host = parsed
        .host_str()
        .ok_or_else(|| TriageError::InvalidUrl("URL must include a host".to_owned()))?;

    if host.eq_ignore_ascii_case("github.com") {
        return Url::parse("https://api.github.com")
            .map_err(|error| TriageError::InvalidUrl(error.to_string()));
    }

    let authority = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_owned()
    };
    let mut api_url = Url::parse(&format!("{}://{authority}", parsed.scheme()))
        .map_err(|error| TriageError::InvalidUrl(error.to_string()))?;

    api_url
        .set_port(parsed.port())
        .map_err(|()| TriageError::InvalidUrl("invalid port".to_owned()))?;
    api_url.set_path("api");
    Ok(api_url)
}

/// Parsed project board URL and derived API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLocator {
    api_base: Url,
    owner_kind: OwnerKind,
    owner: ProjectOwner,
    number: ProjectNumber,
}

impl ProjectLocator {
    /// Parses a project URL in the form
    /// `https://github.com/orgs/<owner>/projects/<number>` or
    /// `https://github.com/users/<owner>/projects/<number>`.
    ///
    /// Trailing segments such as `/views/1` are ignored.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidUrl` when parsing fails,
    /// `InvalidProjectPath` when the path does not have the expected shape,
    /// and `InvalidProjectNumber` when the number is not a positive integer.
    pub fn parse(input: &str) -> Result<Self, TriageError> {
        let parsed =
            Url::parse(input.trim()).map_err(|error| TriageError::InvalidUrl(error.to_string()))?;

        let mut segments = parsed
            .path_segments()
            .ok_or(TriageError::InvalidProjectPath)?;

        let kind_segment = segments.next().ok_or(TriageError::InvalidProjectPath)?;
        let owner_segment = segments.next().ok_or(TriageError::InvalidProjectPath)?;
        let marker = segments.next().ok_or(TriageError::InvalidProjectPath)?;
        let number_segment = segments.next().ok_or(TriageError::InvalidProjectPath)?;

        if !matches!(kind_segment, "orgs" | "users") || marker != "projects" {
            return Err(TriageError::InvalidProjectPath);
        }

        if number_segment.is_empty() {
            return Err(TriageError::InvalidProjectPath);
        }

        if !number_segment.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(TriageError::InvalidProjectNumber);
        }

        let owner_kind = OwnerKind::from_token(kind_segment)?;
        let owner = ProjectOwner::new(owner_segment)?;
        let number = number_segment
            .parse::<u64>()
            .map_err(|_| TriageError::InvalidProjectNumber)
            .and_then(ProjectNumber::new)?;

        let api_base = derive_api_base(&parsed)?;

        Ok(Self {
            api_base,
            owner_kind,
            owner,
            number,
        })
    }

    /// API base URL derived from the project host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Kind of account owning the project.
    #[must_use]
    pub const fn owner_kind(&self) -> OwnerKind {
        self.owner_kind
    }

    /// Project owner login.
    #[must_use]
    pub const fn owner(&self) -> &ProjectOwner {
        &self.owner
    }

    /// Project number.
    #[must_use]
    pub const fn number(&self) -> ProjectNumber {
        self.number
    }
}
