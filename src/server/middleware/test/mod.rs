use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{
        auth::{AuthGuard, Permission},
        session::{AuthSession, CsrfSession, LoginFlowSession},
    },
};
use test_utils::{builder::TestBuilder, factory};

mod session;
