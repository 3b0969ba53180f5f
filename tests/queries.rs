use otter_inc::{
    config::Config,
    context::{Context, NO_REASON},
    reports::Report,
    structures::{
        model::Value,
        term::{Sort, TermId},
    },
    types::err::{ErrorKind, StateError},
};

mod queries {
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
    fn consequences_with_premises() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let v = bools(&mut ctx, &["p", "q", "r"]);
        let (p, q, r) = (v[0], v[1], v[2]);
        let p_q = ctx.terms_mut().mk_implies(p, q).unwrap();
        ctx.assert_term(p_q).unwrap();

        let (report, consequences) = ctx.consequences(&[p], &[q, r]);
        assert_eq!(report, Report::Satisfiable);
        assert_eq!(consequences, vec![p_q]);
    }

    #[test]
    fn consequences_of_inconsistent_assumptions() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let v = bools(&mut ctx, &["p", "q"]);
        let (p, q) = (v[0], v[1]);
        let not_p = ctx.terms_mut().mk_not(p).unwrap();
        ctx.assert_term(not_p).unwrap();

        let (report, consequences) = ctx.consequences(&[p], &[q]);
        assert_eq!(report, Report::Unsatisfiable);
        assert!(consequences.is_empty());
        assert_eq!(ctx.unsat_core(), &[p]);
    }

    #[test]
    fn negative_consequence() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let v = bools(&mut ctx, &["p", "q"]);
        let (p, q) = (v[0], v[1]);
        let not_q = ctx.terms_mut().mk_not(q).unwrap();
        let p_not_q = ctx.terms_mut().mk_or(&[p, not_q]).unwrap();
        ctx.assert_term(p_not_q).unwrap();

        let not_p = ctx.terms_mut().mk_not(p).unwrap();
        let (report, consequences) = ctx.consequences(&[not_p], &[q]);
        assert_eq!(report, Report::Satisfiable);

        let expected = ctx.terms_mut().mk_implies(not_p, not_q).unwrap();
        assert_eq!(consequences, vec![expected]);
    }

    #[test]
    fn mutexes() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let v = bools(&mut ctx, &["a", "b", "c", "d", "e"]);

        for i in 0..3 {
            for j in i + 1..3 {
                let not_i = ctx.terms_mut().mk_not(v[i]).unwrap();
                let not_j = ctx.terms_mut().mk_not(v[j]).unwrap();
                let clause = ctx.terms_mut().mk_or(&[not_i, not_j]).unwrap();
                ctx.assert_term(clause).unwrap();
            }
        }
        let d_or_e = ctx.terms_mut().mk_or(&[v[3], v[4]]).unwrap();
        ctx.assert_term(d_or_e).unwrap();

        let unknown = bools(&mut ctx, &["f"])[0];
        let mut groups = ctx.find_mutexes(&[v[0], v[1], v[2], v[3], unknown]);
        assert_eq!(groups.len(), 1);

        let group = &mut groups[0];
        group.sort();
        assert_eq!(group, &vec![v[0], v[1], v[2]]);
    }

    #[test]
    fn translation() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let v = bools(&mut ctx, &["p", "g"]);
        let (p, g) = (v[0], v[1]);
        ctx.assert_guarded(p, g).unwrap();

        ctx.push();
        assert!(matches!(
            ctx.translate(Config::default()),
            Err(ErrorKind::State(StateError::NonBaseLevel(1)))
        ));
        ctx.pop(1);

        let mut fresh = ctx.translate(Config::default()).unwrap();
        assert_eq!(fresh.num_assertions(), 1);
        assert_eq!(fresh.num_assumptions(), 1);
        assert_eq!(fresh.frontier(), 0);

        assert_eq!(fresh.check(&[]), Report::Satisfiable);
        assert_eq!(
            fresh.model().cloned().unwrap().value_of_name(fresh.terms(), "p"),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn conflict_limit() {
        init();
        let mut config = Config::default();
        config.engine.conflict_limit.value = 0;
        let mut ctx = Context::from_config(config);
        assert_eq!(ctx.reason_unknown(), NO_REASON);

        // three pigeons, two holes
        let mut holes: Vec<Vec<TermId>> = Vec::default();
        for pigeon in 0..3 {
            let names = [format!("p{pigeon}_0"), format!("p{pigeon}_1")];
            let row = bools(&mut ctx, &[names[0].as_str(), names[1].as_str()]);
            let some_hole = ctx.terms_mut().mk_or(&row).unwrap();
            ctx.assert_term(some_hole).unwrap();
            holes.push(row);
        }
        for hole in 0..2 {
            for a in 0..3 {
                for b in a + 1..3 {
                    let not_a = ctx.terms_mut().mk_not(holes[a][hole]).unwrap();
                    let not_b = ctx.terms_mut().mk_not(holes[b][hole]).unwrap();
                    let apart = ctx.terms_mut().mk_or(&[not_a, not_b]).unwrap();
                    ctx.assert_term(apart).unwrap();
                }
            }
        }

        assert_eq!(ctx.check(&[]), Report::Unknown);
        assert_eq!(ctx.reason_unknown(), "max. conflicts");

        let mut relaxed = Config::default();
        relaxed.engine.conflict_limit.value = 1000;
        ctx.update_config(relaxed).unwrap();
        assert_eq!(ctx.check(&[]), Report::Unsatisfiable);
    }

    #[test]
    fn statistics() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let v = bools(&mut ctx, &["p", "q"]);
        let p_or_q = ctx.terms_mut().mk_or(&v).unwrap();
        ctx.assert_term(p_or_q).unwrap();
        assert_eq!(ctx.check(&[]), Report::Satisfiable);

        let stats = ctx.statistics();
        assert_eq!(stats.get("formulas"), Some(1));
        assert_eq!(stats.get("preprocessing builds"), Some(1));
        assert!(stats.get("mapped atoms").is_some_and(|atoms| atoms >= 2));
    }
}
