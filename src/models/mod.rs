pub mod user;

pub use user::{
    AccountSummary, AccountView, EmailQuery, LoginRequest, NewUser, User, UserId,
    COMPANY_NAME_MAX_LEN, EMAIL_MAX_LEN,
};
