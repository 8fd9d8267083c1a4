pub mod dispatcher;
pub mod method;
pub mod request;
