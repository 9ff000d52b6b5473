use nttkit_hal::backend_test_suite;

backend_test_suite! {
    mod goldilocks,
    backend = crate::CpuRef,
    field = nttkit_hal::layouts::Goldilocks,
    tests = {
        test_ntt_roundtrip => nttkit_hal::test_suite::ntt::test_ntt_roundtrip,
        test_ntt_matches_naive => nttkit_hal::test_suite::ntt::test_ntt_matches_naive,
        test_ntt_orderings => nttkit_hal::test_suite::ntt::test_ntt_orderings,
        test_ntt_coset => nttkit_hal::test_suite::ntt::test_ntt_coset,
        test_ntt_scale => nttkit_hal::test_suite::ntt::test_ntt_scale,
        test_ntt_batch => nttkit_hal::test_suite::ntt::test_ntt_batch,
        test_ntt_inplace => nttkit_hal::test_suite::ntt::test_ntt_inplace,
        test_ntt_rejects_bad_arguments => nttkit_hal::test_suite::ntt::test_ntt_rejects_bad_arguments,
        test_domain_uninitialized => nttkit_hal::test_suite::domain::test_domain_uninitialized,
        test_domain_rou_matches_oracle => nttkit_hal::test_suite::domain::test_domain_rou_matches_oracle,
        test_domain_reuse_policy => nttkit_hal::test_suite::domain::test_domain_reuse_policy,
        test_domain_error_policy => nttkit_hal::test_suite::domain::test_domain_error_policy,
        test_domain_replace_policy => nttkit_hal::test_suite::domain::test_domain_replace_policy,
        test_domain_release_reinit => nttkit_hal::test_suite::domain::test_domain_release_reinit,
        test_domain_rejects_bad_roots => nttkit_hal::test_suite::domain::test_domain_rejects_bad_roots,
        test_domain_max_log_restriction => nttkit_hal::test_suite::domain::test_domain_max_log_restriction,
    }
}

backend_test_suite! {
    mod babybear,
    backend = crate::CpuRef,
    field = nttkit_hal::layouts::BabyBear,
    tests = {
        test_ntt_roundtrip => nttkit_hal::test_suite::ntt::test_ntt_roundtrip,
        test_ntt_matches_naive => nttkit_hal::test_suite::ntt::test_ntt_matches_naive,
        test_ntt_coset => nttkit_hal::test_suite::ntt::test_ntt_coset,
        test_ntt_batch => nttkit_hal::test_suite::ntt::test_ntt_batch,
        test_domain_rou_matches_oracle => nttkit_hal::test_suite::domain::test_domain_rou_matches_oracle,
        test_domain_release_reinit => nttkit_hal::test_suite::domain::test_domain_release_reinit,
    }
}

backend_test_suite! {
    mod proth23,
    backend = crate::CpuRef,
    field = nttkit_hal::layouts::Proth23,
    tests = {
        test_ntt_roundtrip => nttkit_hal::test_suite::ntt::test_ntt_roundtrip,
        test_ntt_matches_naive => nttkit_hal::test_suite::ntt::test_ntt_matches_naive,
        test_ntt_orderings => nttkit_hal::test_suite::ntt::test_ntt_orderings,
        test_domain_rou_matches_oracle => nttkit_hal::test_suite::domain::test_domain_rou_matches_oracle,
        test_domain_rejects_bad_roots => nttkit_hal::test_suite::domain::test_domain_rejects_bad_roots,
    }
}
