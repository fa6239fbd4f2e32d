use indoc::indoc;
use kestrel_core::QName;
use kestrel_meta::{ExprId, Interface, RhoId};

use crate::test_utils::*;
use crate::{
    CodecConfig, Error, Export, InterfaceLoader, ModuleInterface, Position, Severity, Sigma,
    encode_interface, store,
};

fn load(bytes: &[u8]) -> (crate::Result<ModuleInterface>, crate::Diagnostics) {
    let mut diagnostics = crate::Diagnostics::new();
    let result = InterfaceLoader::new().load(bytes, &mut diagnostics);
    (result, diagnostics)
}

fn assert_single_fatal(diagnostics: &crate::Diagnostics) {
    assert_eq!(diagnostics.len(), 1);
    let message = diagnostics.iter().next().unwrap();
    assert_eq!(message.severity, Severity::Fatal);
    assert_eq!(message.position, Position::EndOfModule);
}

#[test]
fn store_then_load() {
    let module = identity_module();
    let bytes = store(&module).unwrap();

    let (result, diagnostics) = load(&bytes);
    assert_eq!(result.unwrap(), module);
    assert!(diagnostics.is_empty());
}

#[test]
fn store_is_deterministic() {
    let module = identity_module();
    assert_eq!(store(&module).unwrap(), store(&module).unwrap());
}

#[test]
fn several_exports_share_one_table_set() {
    let module = ModuleInterface {
        exports: vec![
            Export {
                name: QName::value(PRELUDE, "id"),
                sigma: identity_sigma(),
                inline: None,
            },
            Export {
                name: QName::value(PRELUDE, "const"),
                sigma: Sigma::new(
                    vec![("a".into(), star()), ("b".into(), star())],
                    crate::Rho::fun(vec![], mono(tvar("a")), arrow(tvar("b"), tvar("a"))),
                ),
                inline: Some(lam(local("x"), lam(local("y"), local("x")))),
            },
        ],
    };
    let bytes = store(&module).unwrap();
    let (result, _) = load(&bytes);
    let loaded = result.unwrap();
    assert_eq!(loaded, module);

    let rendered: Vec<String> = loaded
        .exports
        .iter()
        .map(|e| format!("{} :: {}", e.name, e.sigma))
        .collect();
    insta::assert_snapshot!(rendered.join("\n"), @r"
    kestrel.Prelude.id :: ∀a. a -> a
    kestrel.Prelude.const :: ∀a b. a -> b -> a
    ");
}

#[test]
fn empty_module_roundtrips() {
    let module = ModuleInterface::default();
    let (result, diagnostics) = load(&store(&module).unwrap());
    assert_eq!(result.unwrap(), module);
    assert!(diagnostics.is_empty());
}

#[test]
fn corrupt_magic_is_one_fatal() {
    let mut bytes = store(&identity_module()).unwrap();
    bytes[0] = b'X';

    let (result, diagnostics) = load(&bytes);
    assert!(matches!(result, Err(Error::Fatal(_))));
    assert_single_fatal(&diagnostics);
    insta::assert_snapshot!(
        diagnostics.render(Severity::Hint),
        @"fatal at end of module: malformed interface blob: invalid magic: expected KIFC"
    );
}

#[test]
fn truncated_blob_is_one_fatal() {
    let bytes = store(&identity_module()).unwrap();
    for len in [0, 10, 63, bytes.len() - 1] {
        let (result, diagnostics) = load(&bytes[..len]);
        assert!(result.is_err(), "length {len} was accepted");
        assert_single_fatal(&diagnostics);
    }
}

#[test]
fn out_of_bounds_index_is_one_fatal() {
    let mut interface = encode_interface(&identity_module()).unwrap();
    interface.tables.sigmas[1].rho = RhoId(40);
    let bytes = interface.to_bytes().unwrap();

    let (result, diagnostics) = load(&bytes);
    let Err(Error::Fatal(fatal)) = result else {
        panic!("expected fatal error");
    };
    assert_single_fatal(&diagnostics);
    insta::assert_snapshot!(
        fatal,
        @"invalid interface tables: rho index 40 out of bounds (table has 2 records)"
    );
}

#[test]
fn placeholder_inline_body_is_rejected() {
    let mut interface = encode_interface(&identity_module()).unwrap();
    interface.exports[0].inline = Some(ExprId::PLACEHOLDER);

    let mut diagnostics = crate::Diagnostics::new();
    let result = InterfaceLoader::new().load_interface(&interface, &mut diagnostics);
    assert!(result.is_err());
    assert_single_fatal(&diagnostics);
}

#[test]
fn record_budget_is_enforced() {
    let bytes = store(&identity_module()).unwrap();
    let mut diagnostics = crate::Diagnostics::new();
    let result = InterfaceLoader::new()
        .with_max_records(4)
        .load(&bytes, &mut diagnostics);

    let Err(Error::Fatal(fatal)) = result else {
        panic!("expected fatal error");
    };
    insta::assert_snapshot!(
        fatal,
        @"cannot decode interface: interface has 11 records, over the budget of 4"
    );
}

#[test]
fn header_counts_are_budgeted_before_parsing() {
    let mut bytes = store(&identity_module()).unwrap();
    // tau count claims four billion records; the body is left as is
    bytes[28..32].copy_from_slice(&u32::MAX.to_le_bytes());

    let (result, diagnostics) = load(&bytes);
    let Err(Error::Fatal(fatal)) = result else {
        panic!("expected fatal error");
    };
    assert_single_fatal(&diagnostics);
    insta::assert_snapshot!(
        fatal,
        @"cannot decode interface: interface has 4294967304 records, over the budget of 1048576"
    );
}

#[test]
fn string_budget_is_enforced() {
    let bytes = store(&identity_module()).unwrap();
    let mut diagnostics = crate::Diagnostics::new();
    let result = InterfaceLoader::new()
        .with_max_string_bytes(4)
        .load(&bytes, &mut diagnostics);

    let Err(Error::Fatal(fatal)) = result else {
        panic!("expected fatal error");
    };
    assert_single_fatal(&diagnostics);
    insta::assert_snapshot!(
        fatal,
        @"malformed interface blob: strings referenced by the interface exceed 4 bytes"
    );
}

#[test]
fn recursion_limit_is_enforced() {
    let bytes = store(&identity_module()).unwrap();
    let mut diagnostics = crate::Diagnostics::new();
    let result = InterfaceLoader::new()
        .with_recursion_limit(2)
        .load(&bytes, &mut diagnostics);

    assert!(result.is_err());
    assert_single_fatal(&diagnostics);
}

#[test]
fn loader_config() {
    let loader = InterfaceLoader::new()
        .with_max_records(10)
        .with_recursion_limit(20);
    assert_eq!(
        *loader.config(),
        CodecConfig {
            max_records: 10,
            max_depth: 20,
            max_string_bytes: CodecConfig::DEFAULT_MAX_STRING_BYTES,
        }
    );
    assert_eq!(*InterfaceLoader::new().config(), CodecConfig::default());
}

#[test]
fn unresolved_kind_variable_fails_store() {
    let module = ModuleInterface {
        exports: vec![Export {
            name: QName::value(PRELUDE, "bad"),
            sigma: mono(crate::Tau::var("a", crate::Kind::Var(3).into())),
            inline: None,
        }],
    };
    let err = store(&module).unwrap_err();
    insta::assert_snapshot!(
        err,
        @"cannot encode interface: unresolved kind variable ?k3 reached the interface encoder"
    );
}

#[test]
fn loaded_interface_dump() {
    let bytes = store(&identity_module()).unwrap();
    let interface = Interface::from_bytes(&bytes).unwrap();
    let dump = kestrel_meta::dump(&interface, kestrel_core::Colors::OFF);
    assert!(dump.starts_with("[taus]\n"));
    assert!(dump.ends_with(indoc! {r#"
        [exports]
        X0 = N0 :: S1 = E2  ; kestrel.Prelude.id
    "#}));
}
