mod backend;
mod module;
mod ntt;
