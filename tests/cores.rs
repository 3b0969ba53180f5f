use otter_inc::{
    config::Config,
    context::Context,
    reports::Report,
    structures::term::{Sort, TermId},
};

mod cores {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn bools(ctx: &mut Context, names: &[&str]) -> Vec<TermId> {
        names
            .iter()
            .map(|name| ctx.terms_mut().declare_const(name, Sort::Bool).unwrap())
            .collect()
    }

    #[test]
    fn contradiction() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let x = bools(&mut ctx, &["x"])[0];
        let not_x = ctx.terms_mut().mk_not(x).unwrap();

        ctx.assert_term(x).unwrap();
        ctx.assert_term(not_x).unwrap();
        assert_eq!(ctx.check(&[]), Report::Unsatisfiable);
        assert!(ctx.unsat_core().is_empty());
        assert!(ctx.model().is_none());
    }

    #[test]
    fn core_is_drawn_from_assumptions() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let v = bools(&mut ctx, &["p", "q", "r", "s"]);
        let (p, q, r, s) = (v[0], v[1], v[2], v[3]);

        // p -> q -> r -> not s
        let p_q = ctx.terms_mut().mk_implies(p, q).unwrap();
        let q_r = ctx.terms_mut().mk_implies(q, r).unwrap();
        let not_s = ctx.terms_mut().mk_not(s).unwrap();
        let r_not_s = ctx.terms_mut().mk_implies(r, not_s).unwrap();
        for formula in [p_q, q_r, r_not_s] {
            ctx.assert_term(formula).unwrap();
        }

        let unrelated = bools(&mut ctx, &["t"])[0];
        let assumptions = [unrelated, p, s];
        assert_eq!(ctx.check(&assumptions), Report::Unsatisfiable);

        let core = ctx.unsat_core().to_vec();
        assert!(!core.is_empty());
        assert!(core.iter().all(|term| assumptions.contains(term)));

        assert_eq!(ctx.check(&core), Report::Unsatisfiable);
    }

    #[test]
    fn satisfiable_under_assumptions() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let v = bools(&mut ctx, &["p", "q"]);
        let (p, q) = (v[0], v[1]);
        let p_or_q = ctx.terms_mut().mk_or(&[p, q]).unwrap();
        let not_p = ctx.terms_mut().mk_not(p).unwrap();
        let not_q = ctx.terms_mut().mk_not(q).unwrap();

        ctx.assert_term(p_or_q).unwrap();
        assert_eq!(ctx.check(&[not_p]), Report::Satisfiable);
        assert!(ctx.unsat_core().is_empty());

        assert_eq!(ctx.check(&[not_p, not_q]), Report::Unsatisfiable);
        let mut core = ctx.unsat_core().to_vec();
        core.sort();
        let mut expected = vec![not_p, not_q];
        expected.sort();
        assert_eq!(core, expected);

        // the core is cleared by the next query
        assert_eq!(ctx.check(&[]), Report::Satisfiable);
        assert!(ctx.unsat_core().is_empty());
    }

    #[test]
    fn compound_assumption() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let v = bools(&mut ctx, &["p", "q"]);
        let (p, q) = (v[0], v[1]);
        let not_p = ctx.terms_mut().mk_not(p).unwrap();
        let p_and_q = ctx.terms_mut().mk_and(&[p, q]).unwrap();

        ctx.assert_term(not_p).unwrap();
        assert_eq!(ctx.check(&[p_and_q]), Report::Unsatisfiable);
        assert_eq!(ctx.unsat_core(), &[p_and_q]);

        // proxies for compound assumptions are not part of the model
        assert_eq!(ctx.check(&[q]), Report::Satisfiable);
        let model = ctx.model().cloned().unwrap();
        for (decl, _) in model.iter() {
            assert!(!ctx.terms().decl(decl).fresh);
        }
    }

    #[test]
    fn guarded_assertions() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let v = bools(&mut ctx, &["p", "g", "h"]);
        let (p, g, h) = (v[0], v[1], v[2]);
        let not_p = ctx.terms_mut().mk_not(p).unwrap();

        ctx.assert_guarded(p, g).unwrap();
        ctx.assert_guarded(not_p, h).unwrap();
        assert_eq!(ctx.num_assumptions(), 2);
        assert_eq!(ctx.assumption(0), Some(g));

        assert_eq!(ctx.check(&[]), Report::Unsatisfiable);
        let mut core = ctx.unsat_core().to_vec();
        core.sort();
        let mut expected = vec![g, h];
        expected.sort();
        assert_eq!(core, expected);
    }

    #[test]
    fn cardinality() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let v = bools(&mut ctx, &["a", "b", "c"]);
        let at_most_one = ctx.terms_mut().mk_at_most(1, &v).unwrap();
        ctx.assert_term(at_most_one).unwrap();

        assert_eq!(ctx.check(&[v[0]]), Report::Satisfiable);
        assert_eq!(ctx.check(&[v[0], v[2]]), Report::Unsatisfiable);
        let core = ctx.unsat_core().to_vec();
        assert!(core.iter().all(|term| *term == v[0] || *term == v[2]));

        let at_least_two = ctx.terms_mut().mk_at_least(2, &v).unwrap();
        ctx.assert_term(at_least_two).unwrap();
        assert_eq!(ctx.check(&[]), Report::Unsatisfiable);
    }
}
