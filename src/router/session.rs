// src/router/session.rs

use std::marker::PhantomData;

use crate::{common::error::AppError, models::user::UserSummary};

/// Usuário autenticado, como devolvido pelo login.
pub type SessionUser = UserSummary;

/// Estado da sessão. O papel é decidido uma única vez, no login.
#[derive(Debug, Clone, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Admin(SessionUser),
    Member(SessionUser),
}

impl Session {
    pub fn from_user(user: SessionUser) -> Self {
        if user.role.is_admin() {
            Session::Admin(user)
        } else {
            Session::Member(user)
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Session::Anonymous => None,
            Session::Admin(user) | Session::Member(user) => Some(user),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Session::Admin(_))
    }
}

/// 1. O Trait que define uma regra de acesso às telas
pub trait AccessRule: Send + Sync + 'static {
    fn slug() -> &'static str;
    fn allows(session: &Session) -> bool;
}

/// 2. O Guardião: só existe se a regra aceitou a sessão
pub struct RequireAccess<T>(PhantomData<T>);

impl<T: AccessRule> RequireAccess<T> {
    pub fn check(session: &Session) -> Result<Self, AppError> {
        if T::allows(session) {
            Ok(Self(PhantomData))
        } else {
            tracing::warn!(rule = T::slug(), "Acesso negado à tela");
            Err(AppError::Forbidden)
        }
    }
}

pub struct AdminOnly;

impl AccessRule for AdminOnly {
    fn slug() -> &'static str {
        "admin"
    }

    fn allows(session: &Session) -> bool {
        session.is_admin()
    }
}

pub type RequireAdmin = RequireAccess<AdminOnly>;
