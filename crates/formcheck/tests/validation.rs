use chrono::NaiveDate;
use formcheck::prelude::*;
use formcheck::{missing_translation, CheckError, FieldErrors};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Validate)]
struct Address {
    #[validate(length(min = 2, message = "validation.city"))]
    city: String,
    #[validate(length(equal = 5))]
    zip: String,
}

#[derive(Debug, Validate)]
struct LineItem {
    #[validate(length(min = 1))]
    sku: String,
    #[validate(range(min = 1, max = 99))]
    quantity: u32,
}

#[derive(Debug, Validate)]
struct CreateOrder {
    #[validate(email)]
    email: String,
    #[validate(url)]
    website: String,
    #[validate(required)]
    coupon: Option<String>,
    #[validate(nested)]
    address: Address,
    #[validate(nested)]
    items: Vec<LineItem>,
}

fn valid_order() -> CreateOrder {
    CreateOrder {
        email: "buyer@example.com".into(),
        website: "https://example.com".into(),
        coupon: Some("SPRING".into()),
        address: Address {
            city: "Lyon".into(),
            zip: "69001".into(),
        },
        items: vec![LineItem {
            sku: "A-1".into(),
            quantity: 2,
        }],
    }
}

fn invalid_order() -> CreateOrder {
    CreateOrder {
        email: "buyer".into(),
        website: "example".into(),
        coupon: None,
        address: Address {
            city: "L".into(),
            zip: "6900".into(),
        },
        items: vec![
            LineItem {
                sku: "A-1".into(),
                quantity: 2,
            },
            LineItem {
                sku: String::new(),
                quantity: 100,
            },
        ],
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn valid_record_has_no_errors() {
    let mut v = validation_for("en");
    v.validate_struct(&valid_order());
    assert!(!v.has_errors());
    assert!(v.into_result().is_ok());
}

#[test]
fn record_errors_are_flattened_and_sorted() {
    let mut v = validation_for("en");
    v.validate_struct(&invalid_order());

    let keys: Vec<&str> = v.errors().iter().map(|e| e.key.as_str()).collect();
    assert_eq!(
        keys,
        [
            "address.city",
            "address.zip",
            "coupon",
            "email",
            "items[1].quantity",
            "items[1].sku",
            "website",
        ]
    );

    let map = v.error_map();
    assert_eq!(map["address.zip"].message, "Required length is 5");
    assert_eq!(map["coupon"].message, "Required");
    assert_eq!(map["items[1].quantity"].message, "Range is 1 to 99");
    assert_eq!(map["items[1].sku"].message, "Minimum size is 1");
    assert_eq!(map["website"].message, "Must be a valid URL address");
    // explicit rule messages are templates like any manual message
    assert_eq!(map["address.city"].message, "validation.city");
}

#[test]
fn record_errors_in_chinese() {
    let catalog = Catalog::builder()
        .builtin_locales()
        .entry("zh", "validation.city", "城市名称太短")
        .build();
    let mut v = Validation::builder()
        .locale("zh-CN")
        .translator(catalog)
        .build();
    v.validate_struct(&invalid_order());

    let map = v.error_map();
    assert_eq!(map["address.city"].message, "城市名称太短");
    assert_eq!(map["address.zip"].message, "长度必须为5");
    assert_eq!(map["email"].message, "必须是有效的电子邮件地址");
    assert_eq!(map["items[1].quantity"].message, "取值范围为1到99");
}

#[test]
fn record_and_field_checks_share_a_context() {
    let mut order = valid_order();
    order.email = "nope".into();

    let mut v = validation_for("en");
    v.validate_struct(&order)
        .time_start_end(
            "delivery",
            &day(2024, 5, 2).and_hms_opt(0, 0, 0).unwrap().and_utc(),
            &day(2024, 5, 1).and_hms_opt(0, 0, 0).unwrap().and_utc(),
        )
        .key("delivery_window");
    v.error("email", "Already registered", &[]);

    let errors: FieldErrors = v.into_result().unwrap_err();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get("email").unwrap().message, "Must be a valid email address");
    assert_eq!(
        errors.get("delivery_window").unwrap().message,
        "Start time must not be later than end time"
    );

    let body = serde_json::to_value(&errors).unwrap();
    assert_eq!(body["error"]["type"], "validation_error");
    assert_eq!(body["error"]["fields"][0]["key"], "email");
}

// `apply` succeeds exactly when the check is satisfied.
#[test]
fn apply_matches_is_satisfied() {
    let range = Range::new(1, 10);
    let mut v = Validation::new();
    for n in [1, 5, 10] {
        assert!(range.is_satisfied(&Value::from(n)));
        assert!(v.apply("n", n, &range).is_ok());
    }
    for n in [0, 11] {
        assert!(!range.is_satisfied(&Value::from(n)));
        assert!(!v.apply("n", n, &range).is_ok());
    }
    assert_eq!(v.len(), 2);
}

// `error_map` is stable and keeps the first error per key.
#[test]
fn error_map_first_wins_and_is_stable() {
    let mut v = Validation::new();
    v.error("a", "m1", &[]);
    v.error("a", "m2", &[]);
    assert_eq!(v.error_map()["a"].message, "m1");
    assert_eq!(v.error_map(), v.error_map());
}

// The chain stops at the first failing check.
#[test]
fn chain_short_circuits() {
    #[derive(Debug)]
    struct CountingMatch<'a> {
        inner: Match,
        calls: &'a AtomicUsize,
    }

    impl Check for CountingMatch<'_> {
        fn name(&self) -> &'static str {
            self.inner.name()
        }
        fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.evaluate(value)
        }
        fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
            self.inner.message_key()
        }
        fn default_message(&self) -> String {
            self.inner.default_message()
        }
    }

    let calls = AtomicUsize::new(0);
    let pattern = CountingMatch {
        inner: Match::new("[a-z]+").unwrap(),
        calls: &calls,
    };

    let mut v = Validation::new();
    let result = v.check("f", "", &[&Required, &pattern]);
    assert_eq!(result.error().unwrap().message, "Required");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(v.len(), 1);

    v.check("f", "ABC", &[&Required, &pattern]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(v.errors()[1].message, "Must match [a-z]+");
}

// A translator that knows nothing yields the default messages.
#[test]
fn translator_misses_fall_back() {
    let mut v = Validation::builder()
        .locale("xx")
        .translator(|_: &str, key: &str, _: &[MessageArg]| missing_translation(key))
        .build();
    let checks: [(&dyn Check, Value<'_>); 5] = [
        (&Required, Value::Absent),
        (&Min::new(3), Value::from(1)),
        (&MacAddr, Value::from("00:11")),
        (&Domain, Value::from("-bad-")),
        (&FilePath::default(), Value::from("../etc/passwd")),
    ];
    for (check, value) in checks {
        let message = v.apply("f", value, check).error().unwrap().message.clone();
        assert_eq!(message, check.default_message());
    }
}

// Refining a result touches only its own error.
#[test]
fn key_refinement_targets_last_error() {
    let mut v = Validation::new();
    v.required("a", "");
    v.required("b", "");
    v.min_size("c", "x", 2).key("new");
    let keys: Vec<&str> = v.errors().iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, ["a", "b", "new"]);
}

// Start must not be later than end.
#[test]
fn time_start_end_ordering() {
    let check = TimeStartEnd;
    assert!(!check.is_satisfied(&Value::from((day(2020, 1, 1), day(2019, 12, 31)))));
    assert!(check.is_satisfied(&Value::from((day(2020, 1, 1), day(2020, 1, 1)))));
    assert!(check.is_satisfied(&Value::from((day(2019, 12, 31), day(2020, 1, 1)))));
}

// `clear` drops errors but keeps locale and translator.
#[test]
fn clear_keeps_configuration() {
    let mut v = validation_for("zh");
    v.required("a", "");
    v.clear();
    assert!(!v.has_errors());
    assert!(v.error_map().is_empty());

    v.required("b", "");
    assert_eq!(v.locale(), "zh");
    assert_eq!(v.errors()[0].message, "必填字段");
}

#[test]
fn failures_are_logged() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_test_writer()
        .try_init();

    let mut v = validation_for("en");
    v.url("site", "not a url");
    v.validate_struct(&invalid_order());
    assert!(v.has_errors());
}

#[test]
fn json_args_in_manual_messages() {
    let mut v = validation_for("en");
    v.error("username", "{0} is taken, try {1}", &[json!("alice"), json!("alice2")]);
    assert_eq!(v.errors()[0].message, "alice is taken, try alice2");
}

fn line_item_strategy() -> impl Strategy<Value = LineItem> {
    ("[A-Z0-9-]{0,4}", 0u32..120).prop_map(|(sku, quantity)| LineItem { sku, quantity })
}

proptest! {
    // One error per failing field, keys unique, list positions in numeric order.
    #[test]
    fn record_keys_are_unique_and_ordered(
        items in prop::collection::vec(line_item_strategy(), 0..15),
        email in "[a-z]{1,6}(@example\\.com)?"
    ) {
        let expected = items
            .iter()
            .map(|item| usize::from(item.sku.is_empty()) + usize::from(!(1..=99).contains(&item.quantity)))
            .sum::<usize>()
            + usize::from(!email.contains('@'));

        let mut order = valid_order();
        order.email = email;
        order.items = items;

        let mut v = validation_for("en");
        v.validate_struct(&order);

        let keys: Vec<&str> = v.errors().iter().map(|e| e.key.as_str()).collect();
        prop_assert_eq!(keys.len(), expected);
        prop_assert_eq!(v.error_map().len(), keys.len());

        let positions: Vec<usize> = keys
            .iter()
            .filter_map(|key| key.strip_prefix("items["))
            .filter_map(|rest| rest.split(']').next())
            .map(|index| index.parse().unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
