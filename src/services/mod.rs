pub mod design_tool;
pub mod dispatcher;
pub mod intent;
pub mod llm;
