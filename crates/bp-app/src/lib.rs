/// BraillePixel front end: the shared render pipeline, the JSON request
/// handler and the `braillepixel` command line.
pub mod cli;
pub mod pipeline;
pub mod request;
