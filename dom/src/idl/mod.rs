pub mod dom_exception;
