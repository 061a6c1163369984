//! Client side of the authentication flow: form validation, the account API
//! client, the login/signup state machines, logout, and the client state
//! they update.

pub mod api;
pub mod forms;
pub mod logout;
pub mod storage;
pub mod store;
pub mod validation;

pub use api::{AccountApi, ApiError, HttpAccountApi};
pub use forms::{FailureReason, FormState, LoginForm, Navigation, SignupForm};
pub use logout::logout;
pub use storage::{ClientStorage, JsonFileStorage, MemoryStorage};
pub use store::{Action, AppStore, ClientState};
pub use validation::{LoginInput, SignupInput};
