//! Property-based checks of the decision procedure

mod helpers;

use helpers::AppTree;
use proptest::prelude::*;
use vita_port_check::types::{Portability, Severity};

const ARM_ABIS: &[&str] = &["armeabi", "armeabi-v7a"];
const ENGINE_LIBS: &[&str] = &["libgdx.so", "libunity.so"];
const NON_ARM_ABIS: &[&str] = &["x86", "x86_64", "arm64-v8a", "mips"];
const ROOT_LIBS: &[&str] = &["libgdx.so", "libunity.so", "libmain.so"];
const FMOD_LIBS: &[&str] = &[
    "libfmod.so",
    "libfmodevent.so",
    "libfmodex.so",
    "libfmodstudio.so",
];
const GLES_VERSIONS: &[&str] = &["0x00010000", "0x00020000", "0x00030000", "0x00030001"];

#[derive(Debug, Clone)]
struct TreeShape {
    arm_abis: Vec<&'static str>,
    other_abis: Vec<&'static str>,
    root_libs: Vec<&'static str>,
    fmod_libs: Vec<&'static str>,
    gles: Option<&'static str>,
    kotlin: bool,
}

impl TreeShape {
    fn build(&self) -> AppTree {
        let mut tree = AppTree::new();
        for abi in self.arm_abis.iter().chain(&self.other_abis) {
            tree = tree.abi(abi);
        }
        for lib in &self.root_libs {
            tree = tree.lib(lib);
        }
        for lib in &self.fmod_libs {
            // first ARM folder if any, else a non-ARM one
            let abi = self
                .arm_abis
                .first()
                .or(self.other_abis.first())
                .copied()
                .unwrap_or("x86");
            tree = tree.abi_lib(abi, lib);
        }
        if let Some(gles) = self.gles {
            tree = tree.gles(gles);
        }
        if self.kotlin {
            tree = tree.dir("kotlin");
        }
        tree
    }
}

fn tree_shape(
    arm_abis: impl Strategy<Value = Vec<&'static str>>,
) -> impl Strategy<Value = TreeShape> {
    (
        arm_abis,
        proptest::sample::subsequence(NON_ARM_ABIS, 0..=NON_ARM_ABIS.len()),
        proptest::sample::subsequence(ROOT_LIBS, 0..=ROOT_LIBS.len()),
        proptest::sample::subsequence(FMOD_LIBS, 0..=FMOD_LIBS.len()),
        proptest::option::of(proptest::sample::select(GLES_VERSIONS)),
        any::<bool>(),
    )
        .prop_map(
            |(arm_abis, other_abis, root_libs, fmod_libs, gles, kotlin)| TreeShape {
                arm_abis,
                other_abis,
                root_libs,
                fmod_libs,
                gles,
                kotlin,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_no_arm_abi_is_impossible(shape in tree_shape(Just(Vec::new()))) {
        let verdict = shape.build().classify();

        prop_assert_eq!(verdict.portability, Portability::ImpossiblePort);
        prop_assert_eq!(verdict.findings.len(), 1);
        prop_assert_eq!(verdict.findings[0].severity, Severity::ImpossiblePort);
    }

    #[test]
    fn prop_classify_is_idempotent(
        shape in tree_shape(proptest::sample::subsequence(ARM_ABIS, 0..=2))
    ) {
        let tree = shape.build();
        let first = tree.classify();
        let second = tree.classify();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_engine_library_is_impossible(
        shape in tree_shape(proptest::sample::subsequence(ARM_ABIS, 1..=2)),
        engine in proptest::sample::select(ENGINE_LIBS),
    ) {
        let tree = shape.build().lib(engine);
        let verdict = tree.classify();

        prop_assert_eq!(verdict.portability, Portability::ImpossiblePort);
    }

    #[test]
    fn prop_exactly_one_deciding_finding(
        shape in tree_shape(proptest::sample::subsequence(ARM_ABIS, 0..=2))
    ) {
        let verdict = shape.build().classify();
        let non_info: Vec<_> = verdict
            .findings
            .iter()
            .filter(|finding| finding.severity != Severity::Info)
            .collect();

        prop_assert_eq!(non_info.len(), 1);
        prop_assert_eq!(Some(non_info[0]), verdict.findings.last());
        prop_assert!(verdict.portability != Portability::Inconclusive);
    }
}
