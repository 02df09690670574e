pub mod transport;
pub mod request_builder;
pub mod response_converter;
pub mod dispatcher;

pub use transport::ReqwestTransport;
pub use request_builder::{RequestBuilderImpl, NULL_REQUEST_BODY_CLASS};
pub use response_converter::ResponseClassifier;
pub use dispatcher::RequestDispatcher;
