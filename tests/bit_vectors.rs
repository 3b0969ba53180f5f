use num_bigint::BigUint;
use otter_inc::{
    config::Config,
    context::Context,
    reports::Report,
    structures::{model::Value, term::Sort},
};

mod bit_vectors {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn bv(value: u32, width: u32) -> Value {
        Value::BitVec {
            value: BigUint::from(value),
            width,
        }
    }

    #[test]
    fn model_values() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let b = ctx.terms_mut().declare_const("b", Sort::BitVec(4)).unwrap();
        let c = ctx.terms_mut().declare_const("c", Sort::BitVec(4)).unwrap();
        let three = ctx.terms_mut().mk_numeral_u64(3, 4).unwrap();
        let seven = ctx.terms_mut().mk_numeral_u64(7, 4).unwrap();
        let sum = ctx.terms_mut().mk_bv_add(&[b, c]).unwrap();
        let b_is_three = ctx.terms_mut().mk_eq(b, three).unwrap();
        let sum_is_seven = ctx.terms_mut().mk_eq(sum, seven).unwrap();

        ctx.assert_term(b_is_three).unwrap();
        ctx.assert_term(sum_is_seven).unwrap();
        assert_eq!(ctx.check(&[]), Report::Satisfiable);

        let model = ctx.model().cloned().unwrap();
        assert_eq!(model.value_of_name(ctx.terms(), "b"), Some(&bv(3, 4)));
        assert_eq!(model.value_of_name(ctx.terms(), "c"), Some(&bv(4, 4)));
    }

    #[test]
    fn comparison_under_assumption() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let b = ctx.terms_mut().declare_const("b", Sort::BitVec(3)).unwrap();
        let two = ctx.terms_mut().mk_numeral_u64(2, 3).unwrap();
        let five = ctx.terms_mut().mk_numeral_u64(5, 3).unwrap();
        let below_two = ctx.terms_mut().mk_bv_ult(b, two).unwrap();
        let b_is_five = ctx.terms_mut().mk_eq(b, five).unwrap();

        ctx.assert_term(below_two).unwrap();
        assert_eq!(ctx.check(&[b_is_five]), Report::Unsatisfiable);
        assert_eq!(ctx.unsat_core(), &[b_is_five]);

        assert_eq!(ctx.check(&[]), Report::Satisfiable);
        let value = ctx.model().cloned().unwrap().value_of_name(ctx.terms(), "b").cloned();
        assert!(value == Some(bv(0, 3)) || value == Some(bv(1, 3)));
    }

    #[test]
    fn fixed_value_is_a_consequence() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let b = ctx.terms_mut().declare_const("b", Sort::BitVec(4)).unwrap();
        let five = ctx.terms_mut().mk_numeral_u64(5, 4).unwrap();
        let b_is_five = ctx.terms_mut().mk_eq(b, five).unwrap();
        ctx.assert_term(b_is_five).unwrap();

        let (report, consequences) = ctx.consequences(&[], &[b]);
        assert_eq!(report, Report::Satisfiable);
        assert_eq!(consequences, vec![b_is_five]);
    }

    #[test]
    fn bits_survive_scopes() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let b = ctx.terms_mut().declare_const("b", Sort::BitVec(2)).unwrap();
        let one = ctx.terms_mut().mk_numeral_u64(1, 2).unwrap();
        let two = ctx.terms_mut().mk_numeral_u64(2, 2).unwrap();
        let b_is_one = ctx.terms_mut().mk_eq(b, one).unwrap();
        let b_is_two = ctx.terms_mut().mk_eq(b, two).unwrap();

        ctx.assert_term(b_is_one).unwrap();
        ctx.push();
        ctx.assert_term(b_is_two).unwrap();
        assert_eq!(ctx.check(&[]), Report::Unsatisfiable);
        ctx.pop(1);

        assert_eq!(ctx.check(&[]), Report::Satisfiable);
        assert_eq!(
            ctx.model().cloned().unwrap().value_of_name(ctx.terms(), "b"),
            Some(&bv(1, 2))
        );
    }

    #[test]
    fn bit_limit_is_unknown() {
        init();
        let mut config = Config::default();
        config.blast_max_bits.value = 4;
        let mut ctx = Context::from_config(config);
        let b = ctx.terms_mut().declare_const("b", Sort::BitVec(8)).unwrap();
        let zero = ctx.terms_mut().mk_numeral_u64(0, 8).unwrap();
        let b_is_zero = ctx.terms_mut().mk_eq(b, zero).unwrap();
        ctx.assert_term(b_is_zero).unwrap();

        assert_eq!(ctx.check(&[]), Report::Unknown);
        assert!(ctx.reason_unknown().contains("bit_blast"));
        assert_eq!(ctx.frontier(), 0);
    }

    #[test]
    fn bits_survive_a_failed_lowering() {
        init();
        let mut config = Config::default();
        config.blast_max_bits.value = 8;
        let mut ctx = Context::from_config(config);
        let b = ctx.terms_mut().declare_const("b", Sort::BitVec(4)).unwrap();
        let c = ctx.terms_mut().declare_const("c", Sort::BitVec(8)).unwrap();
        let five = ctx.terms_mut().mk_numeral_u64(5, 4).unwrap();
        let six = ctx.terms_mut().mk_numeral_u64(6, 4).unwrap();
        let one = ctx.terms_mut().mk_numeral_u64(1, 8).unwrap();
        let b_is_five = ctx.terms_mut().mk_eq(b, five).unwrap();
        let b_is_six = ctx.terms_mut().mk_eq(b, six).unwrap();
        let c_is_one = ctx.terms_mut().mk_eq(c, one).unwrap();

        ctx.assert_term(b_is_five).unwrap();
        assert_eq!(ctx.check(&[]), Report::Satisfiable);

        ctx.push();
        ctx.assert_term(c_is_one).unwrap();
        assert_eq!(ctx.check(&[]), Report::Unknown);
        assert!(ctx.reason_unknown().contains("bit_blast"));
        ctx.pop(1);

        assert_eq!(ctx.check(&[b_is_six]), Report::Unsatisfiable);
        assert_eq!(ctx.unsat_core(), &[b_is_six]);

        assert_eq!(ctx.check(&[]), Report::Satisfiable);
        assert_eq!(
            ctx.model().cloned().unwrap().value_of_name(ctx.terms(), "b"),
            Some(&bv(5, 4))
        );
    }

    #[test]
    fn relaxed_bit_limit() {
        init();
        let mut config = Config::default();
        config.blast_max_bits.value = 4;
        let mut ctx = Context::from_config(config);
        let b = ctx.terms_mut().declare_const("b", Sort::BitVec(8)).unwrap();
        let zero = ctx.terms_mut().mk_numeral_u64(0, 8).unwrap();
        let one = ctx.terms_mut().mk_numeral_u64(1, 8).unwrap();
        let b_is_zero = ctx.terms_mut().mk_eq(b, zero).unwrap();
        let b_is_one = ctx.terms_mut().mk_eq(b, one).unwrap();
        ctx.assert_term(b_is_zero).unwrap();
        assert_eq!(ctx.check(&[]), Report::Unknown);

        ctx.update_config(Config::default()).unwrap();
        assert_eq!(ctx.check(&[]), Report::Satisfiable);
        assert_eq!(ctx.frontier(), 1);
        assert_eq!(
            ctx.model().cloned().unwrap().value_of_name(ctx.terms(), "b"),
            Some(&bv(0, 8))
        );

        assert_eq!(ctx.check(&[b_is_one]), Report::Unsatisfiable);
        assert_eq!(ctx.unsat_core(), &[b_is_one]);
    }

    #[test]
    fn interpreted_atoms_are_unknown() {
        init();
        let mut ctx = Context::from_config(Config::default());
        let f = ctx
            .terms_mut()
            .declare_fun("f", &[Sort::Bool], Sort::BitVec(2))
            .unwrap();
        let p = ctx.terms_mut().declare_const("p", Sort::Bool).unwrap();
        let app = ctx.terms_mut().mk_app(f, &[p]).unwrap();
        let one = ctx.terms_mut().mk_numeral_u64(1, 2).unwrap();
        let eq = ctx.terms_mut().mk_eq(app, one).unwrap();
        ctx.assert_term(eq).unwrap();

        assert_eq!(ctx.check(&[]), Report::Unknown);
        assert!(ctx
            .reason_unknown()
            .starts_with("interpreted atoms sent to SAT solver"));
        assert_eq!(ctx.frontier(), 0);
    }
}
