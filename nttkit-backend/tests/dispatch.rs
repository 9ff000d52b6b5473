use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use nttkit_backend::{CpuPar, CpuRef, cpu_registry};
use nttkit_hal::{
    api::{ModuleNew, NttBackend},
    dispatch::Dispatcher,
    layouts::{
        BabyBear, Device, Field, Module, NttBuffers, NttConfig, NttDir, NttError, NttInitDomainConfig, NttResult,
    },
    reference::rou::root_of_unity,
    registry::Registry,
};

/// Fails every operation with a fixed error after counting the call.
struct Failing {
    calls: Arc<AtomicUsize>,
    error: NttError,
}

impl Failing {
    fn fail<T>(&self) -> NttResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

impl NttBackend<BabyBear> for Failing {
    fn name(&self) -> &'static str {
        "FAILING"
    }

    fn supports_inplace(&self) -> bool {
        false
    }

    fn ntt(&self, _buffers: NttBuffers<'_, BabyBear>, _size: usize, _dir: NttDir, _config: &NttConfig<BabyBear>) -> NttResult<()> {
        self.fail()
    }

    fn init_domain(&self, _primitive_root: BabyBear, _config: &NttInitDomainConfig) -> NttResult<()> {
        self.fail()
    }

    fn release_domain(&self) -> NttResult<()> {
        self.fail()
    }

    fn rou_from_domain(&self, _logn: u64) -> NttResult<BabyBear> {
        self.fail()
    }
}

fn failing(error: NttError) -> (Arc<AtomicUsize>, Arc<dyn NttBackend<BabyBear>>) {
    let calls: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    let backend: Arc<dyn NttBackend<BabyBear>> = Arc::new(Failing {
        calls: calls.clone(),
        error,
    });
    (calls, backend)
}

#[test]
fn unregistered_device_never_invokes_a_backend() {
    let (calls, backend) = failing(NttError::Internal("unreachable".into()));
    let mut builder = Registry::<BabyBear>::builder();
    builder.register_default(backend).unwrap();
    let registry: Registry<BabyBear> = builder.build();
    let dispatcher: Dispatcher<'_, BabyBear> = Dispatcher::new(&registry);

    let device: Device = Device::new("FPGA", 0);
    let mut data: Vec<BabyBear> = vec![BabyBear::default(); 4];
    assert_eq!(
        dispatcher.ntt(&device, NttBuffers::InPlace(&mut data), 4, NttDir::Forward, &NttConfig::default()),
        Err(NttError::BackendNotFound("FPGA".into()))
    );
    assert!(matches!(dispatcher.release_domain(&device), Err(NttError::BackendNotFound(_))));
    assert!(matches!(dispatcher.rou_from_domain(&device, 1), Err(NttError::BackendNotFound(_))));
    assert!(matches!(
        dispatcher.execute(&device, |_| -> NttResult<()> { panic!("must not run") }),
        Err(NttError::BackendNotFound(_))
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn backend_errors_pass_through_unchanged() {
    let error: NttError = NttError::AllocationFailure { elements: 1 << 40 };
    let (calls, backend) = failing(error.clone());
    let mut builder = Registry::<BabyBear>::builder();
    builder.register("FLAKY", backend).unwrap();
    let registry: Registry<BabyBear> = builder.build();
    let dispatcher: Dispatcher<'_, BabyBear> = Dispatcher::new(&registry);

    let device: Device = Device::new("FLAKY", 3);
    assert_eq!(
        dispatcher.init_domain(&device, BabyBear::omega(2).unwrap(), &NttInitDomainConfig::default()),
        Err(error.clone())
    );
    assert_eq!(dispatcher.rou_from_domain(&device, 0), Err(error));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut builder = Registry::<BabyBear>::builder();
    builder.register("CPU", Arc::new(Module::<CpuRef, BabyBear>::new())).unwrap();
    assert!(matches!(
        builder.register("CPU", Arc::new(Module::<CpuPar, BabyBear>::new())),
        Err(NttError::InvalidArgument(_))
    ));
    let registry: Registry<BabyBear> = builder.build();
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.lookup("CPU").map(|b| b.name()), Some("CPU"));
}

#[test]
fn routes_by_device_kind() {
    let registry: Registry<BabyBear> = cpu_registry().unwrap();
    assert_eq!(registry.devices(), vec!["CPU", "CPU_PAR"]);
    assert!(registry.contains("CPU_PAR"));
    assert!(!registry.contains("cpu"));

    let dispatcher: Dispatcher<'_, BabyBear> = Dispatcher::new(&registry);
    let cpu: Device = Device::new("CPU", 0);
    let cpu_par: Device = Device::new("CPU_PAR", 1);

    // Each registered module owns its own domain.
    let root: BabyBear = root_of_unity(1 << 6).unwrap();
    dispatcher.init_domain(&cpu, root, &NttInitDomainConfig::default()).unwrap();
    assert_eq!(dispatcher.rou_from_domain(&cpu, 6), Ok(root));
    assert!(matches!(
        dispatcher.rou_from_domain(&cpu_par, 6),
        Err(NttError::UninitializedDomain { backend: "CPU_PAR", .. })
    ));

    dispatcher.init_domain(&cpu_par, root, &NttInitDomainConfig::default()).unwrap();
    let a: Vec<BabyBear> = (0..64u64).map(BabyBear::from_u64).collect();
    let mut res_cpu: Vec<BabyBear> = vec![BabyBear::default(); 64];
    let mut res_par: Vec<BabyBear> = vec![BabyBear::default(); 64];
    let config: NttConfig<BabyBear> = NttConfig::default();
    dispatcher
        .ntt(&cpu, NttBuffers::OutOfPlace { input: &a, output: &mut res_cpu }, 64, NttDir::Forward, &config)
        .unwrap();
    dispatcher
        .ntt(&cpu_par, NttBuffers::OutOfPlace { input: &a, output: &mut res_par }, 64, NttDir::Forward, &config)
        .unwrap();
    assert_eq!(res_cpu, res_par);

    dispatcher.release_domain(&cpu).unwrap();
    assert!(matches!(
        dispatcher.rou_from_domain(&cpu, 0),
        Err(NttError::UninitializedDomain { .. })
    ));
    assert_eq!(dispatcher.rou_from_domain(&cpu_par, 0), Ok(BabyBear::omega(0).unwrap()));
}
