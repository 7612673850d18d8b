//! Feature coverage for the inference rules: algebraic data types, pattern
//! matching, references, externs, user-defined operators, casts.

mod common;

use common::*;

use basalt::analysis::AnalysisError;
use basalt::ast::expression::Expression;
use basalt::ast::name::Name;
use basalt::ast::statement::Statement;
use basalt::ast::{Assoc, Function, Program, TopLevel};
use basalt::types::error::TypeError;
use basalt::types::ty::Type;
use basalt::analyze;
use basalt::resolver::ResolveError;

fn find_function<'a>(program: &'a Program<Type>, name: &str) -> &'a Function<Type> {
    for module in &program.modules {
        for top_level in &module.top_levels {
            if let TopLevel::Function(func) = top_level {
                if func.name.name.base() == name {
                    return func;
                }
            }
        }
    }
    panic!("no function named {}", name);
}

fn shape_type() -> Type {
    Type::con(Name::qualified(vec!["main".to_string()], "Shape"))
}

#[test]
fn match_over_adt_types_arm_bindings() {
    // type Shape = Circle(i32) | Dot;
    // fn classify(s: Shape) { match s { Circle(r) => r, Dot => 0, _ => 1 } }
    let program = main_module(vec![
        type_def(
            "Shape",
            false,
            &[],
            vec![
                constructor("Circle", vec![named_type("i32")]),
                constructor("Dot", Vec::new()),
            ],
        ),
        func(
            "classify",
            false,
            vec![param("s", Some(named_type("Shape")))],
            None,
            match_expr(
                ident("s"),
                vec![
                    arm(pat_con("Circle", &["r"]), ident("r")),
                    arm(pat_con("Dot", &[]), int(0)),
                    arm(pat_wild(), int(1)),
                ],
            ),
        ),
        func("main", false, Vec::new(), None, unit()),
    ]);
    let typed = analyze(program).expect("program should type-check");
    assert_eq!(
        find_function(&typed, "classify").name.info,
        Type::func(vec![shape_type()], Type::Int32)
    );
}

#[test]
fn constructor_application_instantiates_parameters() {
    // type Box<T> = Mk(T);
    // fn wrap() { Mk(5) }
    let program = main_module(vec![
        type_def(
            "Box",
            false,
            &["T"],
            vec![constructor("Mk", vec![named_type("T")])],
        ),
        func(
            "wrap",
            false,
            Vec::new(),
            None,
            call(ident("Mk"), vec![int(5)]),
        ),
        func("main", false, Vec::new(), None, unit()),
    ]);
    let typed = analyze(program).expect("program should type-check");
    let expected = Type::func(
        Vec::new(),
        Type::Con(
            Name::qualified(vec!["main".to_string()], "Box"),
            vec![Type::Int32],
        ),
    );
    assert_eq!(find_function(&typed, "wrap").name.info, expected);
}

#[test]
fn references_round_trip_through_deref() {
    // fn f() { mut x := 1; p := &x; *p = 2; *p }
    let program = main_module(vec![
        func(
            "f",
            false,
            Vec::new(),
            None,
            block(vec![
                decl("x", true, int(1)),
                decl("p", false, ref_of(ident("x"))),
                expr_stmt(assign(deref(ident("p")), int(2))),
                expr_stmt(deref(ident("p"))),
            ]),
        ),
        func("main", false, Vec::new(), None, unit()),
    ]);
    let typed = analyze(program).expect("program should type-check");
    assert_eq!(
        find_function(&typed, "f").name.info,
        Type::func(Vec::new(), Type::Int32)
    );
}

#[test]
fn assignment_to_non_lvalue_is_rejected() {
    let program = main_module(vec![func(
        "main",
        false,
        Vec::new(),
        None,
        block(vec![expr_stmt(assign(binary("+", int(1), int(2)), int(3)))]),
    )]);
    assert!(matches!(
        analyze(program),
        Err(AnalysisError::Type(TypeError::NonLValue { .. }))
    ));
}

#[test]
fn extern_declaration_is_callable() {
    // extern puts(str) -> i32; fn main() { puts("hi"); }
    let program = main_module(vec![
        extern_decl("puts", vec![Type::Str], Type::Int32),
        func(
            "main",
            false,
            Vec::new(),
            None,
            block(vec![expr_stmt(call(ident("puts"), vec![string("hi")]))]),
        ),
    ]);
    let typed = analyze(program).expect("program should type-check");
    assert_eq!(
        find_function(&typed, "main").name.info,
        Type::func(Vec::new(), Type::Int32)
    );
}

#[test]
fn extern_declarations_are_module_local() {
    // Externs are not exported, even through a direct import.
    let program = program(vec![
        module(
            &[],
            "lib",
            Vec::new(),
            vec![extern_decl("puts", vec![Type::Str], Type::Int32)],
        ),
        module(
            &[],
            "main",
            vec![import(false, &["lib"])],
            vec![func(
                "main",
                false,
                Vec::new(),
                None,
                call(ident("puts"), vec![string("hi")]),
            )],
        ),
    ]);
    assert!(matches!(
        analyze(program),
        Err(AnalysisError::Resolve(ResolveError::Undefined { .. }))
    ));
}

#[test]
fn prefix_operator_is_looked_up() {
    // op prefix 30 ! (b: bool) { if b false else true }; fn main() { !true; }
    let program = main_module(vec![
        op(
            "!",
            false,
            Assoc::Prefix,
            30,
            vec![param("b", Some(Type::Bool))],
            None,
            if_expr(ident("b"), boolean(false), boolean(true)),
        ),
        func(
            "main",
            false,
            Vec::new(),
            None,
            block(vec![expr_stmt(unary("!", boolean(true)))]),
        ),
    ]);
    let typed = analyze(program).expect("program should type-check");
    assert_eq!(
        find_function(&typed, "main").name.info,
        Type::func(Vec::new(), Type::Bool)
    );
}

#[test]
fn imported_operator_resolves() {
    // Module ops defines a public <> operator; main imports and uses it.
    let program = program(vec![
        module(
            &[],
            "ops",
            Vec::new(),
            vec![op(
                "<>",
                true,
                Assoc::Left,
                5,
                vec![
                    param("a", Some(named_type("i32"))),
                    param("b", Some(named_type("i32"))),
                ],
                None,
                binary("+", ident("a"), ident("b")),
            )],
        ),
        module(
            &[],
            "main",
            vec![import(false, &["ops"])],
            vec![func(
                "main",
                false,
                Vec::new(),
                None,
                block(vec![expr_stmt(binary("<>", int(1), int(2)))]),
            )],
        ),
    ]);
    let typed = analyze(program).expect("program should type-check");
    assert_eq!(
        find_function(&typed, "main").name.info,
        Type::func(Vec::new(), Type::Int32)
    );
}

#[test]
fn closures_are_rejected() {
    let program = main_module(vec![func(
        "main",
        false,
        Vec::new(),
        None,
        block(vec![decl(
            "f",
            false,
            closure(vec![param("x", None)], ident("x")),
        )]),
    )]);
    assert!(matches!(
        analyze(program),
        Err(AnalysisError::Type(TypeError::NotImplemented { .. }))
    ));
}

#[test]
fn empty_match_is_rejected() {
    let program = main_module(vec![func(
        "main",
        false,
        Vec::new(),
        None,
        block(vec![expr_stmt(match_expr(int(1), Vec::new()))]),
    )]);
    assert!(matches!(
        analyze(program),
        Err(AnalysisError::Type(TypeError::EmptyMatch { .. }))
    ));
}

#[test]
fn while_condition_must_be_boolean() {
    let program = main_module(vec![func(
        "main",
        false,
        Vec::new(),
        None,
        block(vec![while_stmt(int(1), block(Vec::new()))]),
    )]);
    assert!(matches!(
        analyze(program),
        Err(AnalysisError::Type(TypeError::Mismatch { .. }))
    ));
}

#[test]
fn match_arms_must_agree() {
    // match 1 { 0 => true, n => n }
    let program = main_module(vec![func(
        "main",
        false,
        Vec::new(),
        None,
        block(vec![expr_stmt(match_expr(
            int(1),
            vec![
                arm(pat_int(0), boolean(true)),
                arm(pat_var("n"), ident("n")),
            ],
        ))]),
    )]);
    assert!(matches!(
        analyze(program),
        Err(AnalysisError::Type(TypeError::Mismatch { .. }))
    ));
}

#[test]
fn literal_pattern_must_match_scrutinee() {
    // match true { 1 => 1, _ => 2 }
    let program = main_module(vec![func(
        "main",
        false,
        Vec::new(),
        None,
        block(vec![expr_stmt(match_expr(
            boolean(true),
            vec![arm(pat_int(1), int(1)), arm(pat_wild(), int(2))],
        ))]),
    )]);
    assert!(matches!(
        analyze(program),
        Err(AnalysisError::Type(TypeError::Mismatch { .. }))
    ));
}

#[test]
fn comparison_yields_boolean() {
    let program = main_module(vec![func(
        "main",
        false,
        Vec::new(),
        None,
        if_expr(binary("<", int(1), int(2)), int(1), int(2)),
    )]);
    let typed = analyze(program).expect("program should type-check");
    assert_eq!(
        find_function(&typed, "main").name.info,
        Type::func(Vec::new(), Type::Int32)
    );
}

#[test]
fn boolean_operators_require_booleans() {
    let program = main_module(vec![func(
        "main",
        false,
        Vec::new(),
        None,
        block(vec![expr_stmt(binary("&&", int(1), boolean(true)))]),
    )]);
    assert!(matches!(
        analyze(program),
        Err(AnalysisError::Type(TypeError::Mismatch { .. }))
    ));
}

#[test]
fn cast_takes_target_type() {
    let program = main_module(vec![func(
        "main",
        false,
        Vec::new(),
        None,
        block(vec![decl("f", false, cast(int(1), Type::Float64))]),
    )]);
    let typed = analyze(program).expect("program should type-check");
    let Expression::Block(body) = &find_function(&typed, "main").body else {
        panic!("expected block body");
    };
    let Statement::Decl(decl) = &body.statements[0] else {
        panic!("expected declaration");
    };
    assert_eq!(decl.name.info, Type::Float64);
}

#[test]
fn sizeof_is_an_int() {
    let program = main_module(vec![func(
        "main",
        false,
        Vec::new(),
        None,
        sizeof(named_type("i64")),
    )]);
    let typed = analyze(program).expect("program should type-check");
    assert_eq!(
        find_function(&typed, "main").name.info,
        Type::func(Vec::new(), Type::Int32)
    );
}

#[test]
fn imported_constructor_matches_in_pattern() {
    // Module lib defines a public option type; main matches over it.
    let program = program(vec![
        module(
            &[],
            "lib",
            Vec::new(),
            vec![type_def(
                "Opt",
                true,
                &[],
                vec![
                    constructor("Found", vec![named_type("i32")]),
                    constructor("Missing", Vec::new()),
                ],
            )],
        ),
        module(
            &[],
            "main",
            vec![import(false, &["lib"])],
            vec![func(
                "main",
                false,
                Vec::new(),
                None,
                match_expr(
                    call(ident("Found"), vec![int(1)]),
                    vec![
                        arm(pat_con("Found", &["v"]), ident("v")),
                        arm(pat_con("Missing", &[]), int(0)),
                    ],
                ),
            )],
        ),
    ]);
    let typed = analyze(program).expect("program should type-check");
    assert_eq!(
        find_function(&typed, "main").name.info,
        Type::func(Vec::new(), Type::Int32)
    );
}

#[test]
fn argument_count_mismatch_is_rejected() {
    let program = main_module(vec![
        func(
            "pair",
            false,
            vec![param("a", Some(named_type("i32"))), param("b", Some(named_type("i32")))],
            None,
            binary("+", ident("a"), ident("b")),
        ),
        func(
            "main",
            false,
            Vec::new(),
            None,
            call(ident("pair"), vec![int(1)]),
        ),
    ]);
    assert!(matches!(
        analyze(program),
        Err(AnalysisError::Type(TypeError::Mismatch { .. }))
    ));
}
