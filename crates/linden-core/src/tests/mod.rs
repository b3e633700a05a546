mod dom_tests;
mod hooks_tests;
