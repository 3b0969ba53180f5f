use otter_inc::{
    config::Config,
    context::Context,
    reports::Report,
    structures::{model::Value, term::Sort},
};

mod scopes {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn push_pop_restores_formulas() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let x = ctx.terms_mut().declare_const("x", Sort::Bool).unwrap();
        let y = ctx.terms_mut().declare_const("y", Sort::Bool).unwrap();
        let not_x = ctx.terms_mut().mk_not(x).unwrap();
        let not_y = ctx.terms_mut().mk_not(y).unwrap();
        let y_or_not_x = ctx.terms_mut().mk_or(&[y, not_x]).unwrap();

        ctx.assert_term(x).unwrap();
        ctx.assert_term(y_or_not_x).unwrap();
        assert_eq!(ctx.check(&[]), Report::Satisfiable);
        assert_eq!(
            ctx.model().cloned().unwrap().value_of_name(ctx.terms(), "y"),
            Some(&Value::Bool(true))
        );

        ctx.push();
        assert_eq!(ctx.scope_depth(), 1);
        assert_eq!(ctx.frontier(), 2);

        ctx.assert_term(not_y).unwrap();
        assert_eq!(ctx.check(&[]), Report::Unsatisfiable);

        ctx.pop(1);
        assert_eq!(ctx.scope_depth(), 0);
        assert_eq!(ctx.num_assertions(), 2);
        assert_eq!(ctx.assertion(0), Some(x));
        assert_eq!(ctx.assertion(1), Some(y_or_not_x));
        assert_eq!(ctx.assertion(2), None);
        assert_eq!(ctx.check(&[]), Report::Satisfiable);
    }

    #[test]
    fn scoped_assertion_is_retracted() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.terms_mut().declare_const("p", Sort::Bool).unwrap();
        let not_p = ctx.terms_mut().mk_not(p).unwrap();

        ctx.push();
        ctx.assert_term(p).unwrap();
        assert_eq!(ctx.check(&[not_p]), Report::Unsatisfiable);
        ctx.pop(1);

        assert_eq!(ctx.check(&[not_p]), Report::Satisfiable);
        assert_eq!(
            ctx.model().cloned().unwrap().value_of_name(ctx.terms(), "p"),
            Some(&Value::Bool(false))
        );
    }

    #[test]
    fn pop_is_clamped() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.terms_mut().declare_const("p", Sort::Bool).unwrap();

        ctx.push();
        ctx.assert_term(p).unwrap();
        ctx.push();
        assert_eq!(ctx.scope_depth(), 2);

        ctx.pop(7);
        assert_eq!(ctx.scope_depth(), 0);
        assert_eq!(ctx.num_assertions(), 0);

        ctx.pop(1);
        assert_eq!(ctx.scope_depth(), 0);
    }

    #[test]
    fn push_lowers_formulas() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.terms_mut().declare_const("p", Sort::Bool).unwrap();
        let q = ctx.terms_mut().declare_const("q", Sort::Bool).unwrap();

        ctx.assert_term(p).unwrap();
        assert_eq!(ctx.frontier(), 0);
        ctx.push();
        assert_eq!(ctx.frontier(), 1);

        ctx.assert_term(q).unwrap();
        assert_eq!(ctx.frontier(), 1);
        ctx.pop(1);
        assert_eq!(ctx.frontier(), 1);
        assert_eq!(ctx.num_assertions(), 1);
    }

    #[test]
    fn guards_are_scoped() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.terms_mut().declare_const("p", Sort::Bool).unwrap();
        let g = ctx.terms_mut().declare_const("g", Sort::Bool).unwrap();
        let not_p = ctx.terms_mut().mk_not(p).unwrap();

        ctx.assert_term(not_p).unwrap();
        ctx.push();
        ctx.assert_guarded(p, g).unwrap();
        assert_eq!(ctx.num_assumptions(), 1);
        assert_eq!(ctx.check(&[]), Report::Unsatisfiable);
        assert_eq!(ctx.unsat_core(), &[g]);

        ctx.pop(1);
        assert_eq!(ctx.num_assumptions(), 0);
        assert_eq!(ctx.check(&[]), Report::Satisfiable);
    }
}
