pub mod cross;
pub mod domain;
pub mod ntt;

/// Instantiates backend-parametric tests, each on a fresh [`Module`](crate::layouts::Module)
/// so that domain state never leaks between tests.
///
/// With `handle = <expr>` the modules are built from that backend handle
/// instead of [`ModuleNew::new`](crate::api::ModuleNew::new).
#[macro_export]
macro_rules! backend_test_suite {
    (
        mod $modname:ident,
        backend = $backend:ty,
        field = $field:ty,
        tests = {
            $( $(#[$attr:meta])* $test_name:ident => $impl:path ),+ $(,)?
        }
    ) => {
        mod $modname {
            use nttkit_hal::{api::ModuleNew, layouts::Module};

            $(
                $(#[$attr])*
                #[test]
                fn $test_name() {
                    let module: Module<$backend, $field> = Module::<$backend, $field>::new();
                    ($impl)(&module);
                }
            )+
        }
    };
    (
        mod $modname:ident,
        backend = $backend:ty,
        handle = $handle:expr,
        field = $field:ty,
        tests = {
            $( $(#[$attr:meta])* $test_name:ident => $impl:path ),+ $(,)?
        }
    ) => {
        mod $modname {
            use nttkit_hal::layouts::Module;

            $(
                $(#[$attr])*
                #[test]
                fn $test_name() {
                    let module: Module<$backend, $field> = Module::<$backend, $field>::from_handle($handle);
                    ($impl)(&module);
                }
            )+
        }
    };
}

#[macro_export]
macro_rules! cross_backend_test_suite {
    (
        mod $modname:ident,
        backend_ref = $backend_ref:ty,
        backend_test = $backend_test:ty,
        field = $field:ty,
        tests = {
            $( $(#[$attr:meta])* $test_name:ident => $impl:path ),+ $(,)?
        }
    ) => {
        mod $modname {
            use nttkit_hal::{api::ModuleNew, layouts::Module};

            $(
                $(#[$attr])*
                #[test]
                fn $test_name() {
                    let module_ref: Module<$backend_ref, $field> = Module::<$backend_ref, $field>::new();
                    let module_test: Module<$backend_test, $field> = Module::<$backend_test, $field>::new();
                    ($impl)(&module_ref, &module_test);
                }
            )+
        }
    };
    (
        mod $modname:ident,
        backend_ref = $backend_ref:ty,
        backend_test = $backend_test:ty,
        handle_test = $handle_test:expr,
        field = $field:ty,
        tests = {
            $( $(#[$attr:meta])* $test_name:ident => $impl:path ),+ $(,)?
        }
    ) => {
        mod $modname {
            use nttkit_hal::{api::ModuleNew, layouts::Module};

            $(
                $(#[$attr])*
                #[test]
                fn $test_name() {
                    let module_ref: Module<$backend_ref, $field> = Module::<$backend_ref, $field>::new();
                    let module_test: Module<$backend_test, $field> = Module::<$backend_test, $field>::from_handle($handle_test);
                    ($impl)(&module_ref, &module_test);
                }
            )+
        }
    };
}
