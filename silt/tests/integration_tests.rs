use silt::interpret;

#[test]
#[should_panic]
fn smoke_assert() {
    interpret(
        r#"
        assert(false);"#,
    );
}

#[test]
#[should_panic]
fn smoke_assert_eq() {
    interpret(
        r#"
        assert_eq(1, 2);"#,
    );
}

#[test]
fn variables() {
    interpret(
        r#"
        var x = 1;
        assert_eq(x, 1);
        var y = x + 1;
        assert_eq(y, 2);
        assert_eq(y, x + 1);
        x = 10;
        assert_eq(x, 10);
        var unset;
        assert_eq(unset, nil);"#,
    );
}

#[test]
fn comments() {
    interpret(
        r#"
        var x = 1; // a comment
        assert_eq(x, 1);"#,
    );
}

#[test]
fn strings() {
    interpret(
        r#"
        var greeting = "hello" + " " + "world";
        assert_eq(greeting, "hello world");
        assert(greeting != "hello");"#,
    );
}

#[test]
fn print_is_a_statement() {
    interpret(
        r#"
        print "hello";
        print 1 + 2;
        print nil;
        print clock;"#,
    );
}

mod operators {
    use super::*;

    #[test]
    fn arithmetic_precedence() {
        interpret(
            r#"
            assert_eq(1 + 2 * 3, 7);
            assert_eq((1 + 2) * 3, 9);
            assert_eq(10 - 4 - 3, 3);
            assert_eq(-2 * 3, -6);"#,
        );
    }

    #[test]
    fn comparisons() {
        interpret(
            r#"
            assert(1 < 2);
            assert(2 <= 2);
            assert(3 > 2);
            assert(3 >= 3);
            assert(!(2 < 1));"#,
        );
    }

    #[test]
    fn equality_mixes_kinds() {
        interpret(
            r#"
            assert(nil == nil);
            assert(!(nil == false));
            assert(!(0 == false));
            assert(!(1 == "1"));
            assert("a" == "a");"#,
        );
    }

    #[test]
    fn truthiness() {
        interpret(
            r#"
            assert(!!0);
            assert(!!"");
            assert(!nil);
            assert(!false);
            assert(!!true);"#,
        );
    }

    #[test]
    fn short_circuit_returns_the_operand() {
        interpret(
            r#"
            assert_eq(nil or "hi", "hi");
            assert_eq("x" and 0, 0);
            assert_eq(false or false, false);
            var calls = 0;
            fun tick() { calls = calls + 1; return true; }
            var ignored = true or tick();
            assert_eq(calls, 0);
            ignored = false and tick();
            assert_eq(calls, 0);
            ignored = false or tick();
            assert_eq(calls, 1);"#,
        );
    }

    #[test]
    fn ternary_is_right_associative() {
        interpret(
            r#"
            assert_eq(true ? 1 : false ? 2 : 3, 1);
            assert_eq(false ? 1 : true ? 2 : 3, 2);
            assert_eq(false ? 1 : false ? 2 : 3, 3);"#,
        );
    }

    #[test]
    fn division_by_zero_is_not_an_error() {
        interpret(
            r#"
            assert(1 / 0 > 0);
            var nan = 0 / 0;
            assert(nan != nan);"#,
        );
    }

    #[test]
    #[should_panic]
    fn adding_number_and_string_fails() {
        interpret(r#"print 1 + "a";"#);
    }

    #[test]
    #[should_panic]
    fn comparing_strings_with_less_than_fails() {
        interpret(r#"print "a" < "b";"#);
    }
}

mod control_flow {
    use super::*;

    #[test]
    fn if_else() {
        interpret(
            r#"
            var x = 0;
            if (1 < 2) x = 1; else x = 2;
            assert_eq(x, 1);
            if (false) x = 3;
            assert_eq(x, 1);"#,
        );
    }

    #[test]
    fn while_loop() {
        interpret(
            r#"
            var i = 0;
            var sum = 0;
            while (i < 5) {
                sum = sum + i;
                i = i + 1;
            }
            assert_eq(sum, 10);"#,
        );
    }

    #[test]
    fn for_loop_matches_manual_while() {
        interpret(
            r#"
            var from_for = 0;
            for (var i = 0; i < 5; i = i + 1) from_for = from_for + i;

            var from_while = 0;
            {
                var i = 0;
                while (i < 5) {
                    from_while = from_while + i;
                    i = i + 1;
                }
            }
            assert_eq(from_for, from_while);"#,
        );
    }

    #[test]
    fn break_exits_the_loop() {
        interpret(
            r#"
            var last = -1;
            for (var i = 0; i < 5; i = i + 1) {
                if (i == 3) break;
                last = i;
            }
            assert_eq(last, 2);"#,
        );
    }

    #[test]
    fn break_only_exits_the_innermost_loop() {
        interpret(
            r#"
            var laps = 0;
            for (var i = 0; i < 3; i = i + 1) {
                while (true) break;
                laps = laps + 1;
            }
            assert_eq(laps, 3);"#,
        );
    }
}

mod functions {
    use super::*;

    #[test]
    fn functions() {
        interpret(
            r#"
            fun foo() {
                return 1;
            }
            assert_eq(foo(), 1);"#,
        );
    }

    #[test]
    fn functions_with_params() {
        interpret(
            r#"
            fun double(x) {
                var result = x * 2;
                return result;
            }
            assert_eq(double(10), 20);
            assert_eq(double(-2), -4);"#,
        );
    }

    #[test]
    fn functions_implicit_return() {
        interpret(
            r#"
            fun foo() { }
            assert_eq(foo(), nil);"#,
        );
    }

    #[test]
    fn recursion() {
        interpret(
            r#"
            fun fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); }
            assert_eq(fib(10), 55);"#,
        );
    }

    #[test]
    fn return_unwinds_loops_and_blocks() {
        interpret(
            r#"
            fun first_big_square(limit) {
                for (var i = 1; i < limit; i = i + 1) {
                    { if (i * i > 10) return i; }
                }
                return nil;
            }
            assert_eq(first_big_square(10), 4);"#,
        );
    }

    #[test]
    fn higher_order_function() {
        interpret(
            r#"
            fun twice(f, v) {
                return f(f(v));
            }
            fun double(x) {
                return x * 2;
            }

            assert_eq(twice(double, 10), 40);
            assert_eq(twice(double, -2), -8);"#,
        );
    }

    #[test]
    fn lambdas() {
        interpret(
            r#"
            var double = fun (x) { return x * 2; };
            assert_eq(double(21), 42);

            fun apply(f, v) { return f(v); }
            assert_eq(apply(fun (x) { return x + 1; }, 1), 2);"#,
        );
    }

    #[test]
    #[should_panic]
    fn arity_is_checked() {
        interpret(
            r#"
            fun foo(a, b) { return a + b; }
            foo(1);"#,
        );
    }

    #[test]
    #[should_panic]
    fn only_functions_are_callable() {
        interpret(
            r#"
            var x = "not a function";
            x();"#,
        );
    }

    mod closures {
        use super::*;

        #[test]
        fn close_global_variable() {
            interpret(
                r#"
                fun assert_test() {
                    assert(true); // captures assert fn from global scope
                }
                assert_test();"#,
            );
        }

        #[test]
        fn basic_closures() {
            interpret(
                r#"
                fun closure() {
                    var x = 1;
                    fun inner() {
                        return x + 1;
                    }
                    return inner();
                }
                assert_eq(closure(), 2);"#,
            );
        }

        #[test]
        fn close_upvalues() {
            interpret(
                r#"
                fun createAdder(x) {
                    fun adder(y) {
                        return x + y;
                    }
                    return adder;
                }
                var addTwo = createAdder(2);
                assert_eq(addTwo(1), 3);"#,
            );
            interpret(
                r#"
                fun compose(f, g) {
                    fun inner(x) {
                        return f(g(x));
                    }
                    return inner;
                }
                fun addOne(x) { return x + 1; }
                fun addTwo(x) { return x + 2; }
                var addThree = compose(addOne, addTwo);
                assert_eq(addThree(2), 5);"#,
            );
        }

        #[test]
        fn capture_by_ref() {
            interpret(
                r#"
                var globalSet = nil;
                var globalGet = nil;

                fun main() {
                    var a = "initial";

                    fun set() { a = "updated"; }
                    fun get() { return a; }

                    globalSet = set;
                    globalGet = get;
                }

                main();
                assert_eq(globalGet(), "initial");
                globalSet();
                assert_eq(globalGet(), "updated");"#,
            );
        }

        #[test]
        fn capture_is_lexical_not_dynamic() {
            interpret(
                r#"
                var a = "global";
                {
                    fun show() { return a; }
                    assert_eq(show(), "global");
                    var a = "block";
                    assert_eq(show(), "global");
                    assert_eq(a, "block");
                }"#,
            );
        }

        #[test]
        fn nested_upvalues() {
            interpret(
                r#"
                fun outer() {
                    var x = "value";

                    fun middle() {
                        fun inner() {
                            return x;
                        }
                        return inner;
                    }
                    return middle;
                }

                var mid = outer();
                var inn = mid();
                assert_eq(inn(), "value");"#,
            );
        }

        #[test]
        fn counter_keeps_state_between_calls() {
            interpret(
                r#"
                fun make_counter() {
                    var n = 0;
                    fun tick() {
                        n = n + 1;
                        return n;
                    }
                    return tick;
                }

                var tick = make_counter();
                assert_eq(tick(), 1);
                assert_eq(tick(), 2);
                var other = make_counter();
                assert_eq(other(), 1);
                assert_eq(tick(), 3);"#,
            );
        }
    }
}

mod errors {
    use super::*;

    #[test]
    #[should_panic]
    fn undefined_variable() {
        interpret(r#"print missing;"#);
    }

    #[test]
    #[should_panic]
    fn assignment_to_undefined_variable() {
        interpret(r#"missing = 1;"#);
    }

    #[test]
    #[should_panic]
    fn parse_error_skips_evaluation() {
        interpret(r#"var x = ;"#);
    }

    #[test]
    #[should_panic]
    fn break_outside_loop_is_rejected() {
        interpret(r#"break;"#);
    }

    #[test]
    #[should_panic]
    fn reading_local_in_its_own_initializer_is_rejected() {
        interpret(
            r#"
            var a = 1;
            {
                var a = a;
            }"#,
        );
    }
}

#[test]
fn clock_advances() {
    interpret(
        r#"
        var before = clock();
        assert(before > 0);
        assert(clock() >= before);"#,
    );
}
